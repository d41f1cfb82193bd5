use web_sys::js_sys::Math;
use yew::prelude::*;
use yew_hooks::prelude::*;

const REFRESH_MS: u32 = 3_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Reading {
    pub altitude_ft: i32,
    pub speed_kts: i32,
    pub heading_deg: i32,
}

impl Default for Reading {
    fn default() -> Self {
        Self {
            altitude_ft: 35_000,
            speed_kts: 450,
            heading_deg: 270,
        }
    }
}

impl Reading {
    /// Builds a reading from three uniform rolls in `[0, 1)`.
    pub fn from_rolls(altitude: f64, speed: f64, heading: f64) -> Self {
        Self {
            altitude_ft: 35_000 + (altitude * 1000.0 - 500.0).floor() as i32,
            speed_kts: 450 + (speed * 50.0 - 25.0).floor() as i32,
            heading_deg: (heading * 360.0).floor() as i32,
        }
    }

    pub fn random() -> Self {
        Self::from_rolls(Math::random(), Math::random(), Math::random())
    }

    pub fn altitude(&self) -> String {
        format!("{} ft", format_thousands(self.altitude_ft))
    }

    pub fn speed(&self) -> String {
        format!("{} kts", self.speed_kts)
    }

    pub fn heading(&self) -> String {
        format!("{}°", self.heading_deg)
    }
}

pub fn format_thousands(value: i32) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    if value < 0 {
        out.insert(0, '-');
    }
    out
}

#[function_component(CockpitDisplay)]
pub fn cockpit_display() -> Html {
    let reading = use_state(Reading::default);
    {
        let reading = reading.clone();
        use_interval(move || reading.set(Reading::random()), REFRESH_MS);
    }

    html! {
        <div class="cockpit-display">
            <div class="instrument altitude-indicator">
                <span class="label">{"ALT"}</span>
                <span class="value">{ reading.altitude() }</span>
            </div>
            <div class="instrument speed-indicator">
                <span class="label">{"SPD"}</span>
                <span class="value">{ reading.speed() }</span>
            </div>
            <div class="instrument heading-indicator">
                <span class="label">{"HDG"}</span>
                <span class="value">{ reading.heading() }</span>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thousands_are_grouped() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(34_500), "34,500");
        assert_eq!(format_thousands(1_234_567), "1,234,567");
        assert_eq!(format_thousands(-35_000), "-35,000");
    }

    #[test]
    fn readings_stay_in_range() {
        for roll in [0.0, 0.25, 0.5, 0.999_999] {
            let r = Reading::from_rolls(roll, roll, roll);
            assert!((34_500..35_500).contains(&r.altitude_ft));
            assert!((425..475).contains(&r.speed_kts));
            assert!((0..360).contains(&r.heading_deg));
        }
    }

    #[test]
    fn labels_carry_units() {
        let r = Reading::from_rolls(0.5, 0.5, 0.5);
        assert_eq!(r.altitude(), "35,000 ft");
        assert_eq!(r.speed(), "450 kts");
        assert_eq!(r.heading(), "180°");
    }
}
