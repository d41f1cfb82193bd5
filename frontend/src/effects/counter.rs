use gloo_timers::callback::Interval;
use yew::prelude::*;

use crate::effects::reveal::use_first_visible;

pub const COUNT_DURATION_MS: u32 = 2_000;
pub const TICK_MS: u32 = 16;
const COUNTER_THRESHOLD: f64 = 0.5;

/// Count-up from zero to the number in a stat label such as "98%" or "500+".
#[derive(Clone, Debug, PartialEq)]
pub struct CounterAnimation {
    target: u64,
    step: f64,
    current: f64,
    suffix: &'static str,
}

impl CounterAnimation {
    /// `None` when the label has no digits to count to.
    pub fn from_label(label: &str) -> Option<Self> {
        let digits: String = label.chars().filter(char::is_ascii_digit).collect();
        let target: u64 = digits.parse().ok()?;
        let suffix = if label.contains('%') { "%" } else { "+" };
        Some(Self {
            target,
            step: target as f64 / f64::from(COUNT_DURATION_MS / TICK_MS),
            current: 0.0,
            suffix,
        })
    }

    /// Advances one tick. Returns false once the target is reached.
    pub fn tick(&mut self) -> bool {
        self.current += self.step;
        if self.current >= self.target as f64 {
            self.current = self.target as f64;
            return false;
        }
        true
    }

    pub fn text(&self) -> String {
        format!("{}{}", self.current.floor() as u64, self.suffix)
    }
}

/// A counter runs once: from the first time it is seen until it finishes.
pub fn should_count(visible: bool, finished: bool) -> bool {
    visible && !finished
}

#[derive(Properties, PartialEq)]
pub struct StatCounterProps {
    pub label: AttrValue,
    pub caption: AttrValue,
}

#[function_component(StatCounter)]
pub fn stat_counter(props: &StatCounterProps) -> Html {
    let node = use_node_ref();
    let visible = use_first_visible(node.clone(), COUNTER_THRESHOLD, None);
    let shown = use_state(|| props.label.to_string());
    let finished = use_state(|| false);
    let done = *finished;

    {
        let shown = shown.clone();
        let finished = finished.clone();
        let label = props.label.clone();
        use_effect_with_deps(
            move |(visible, done): &(bool, bool)| {
                let mut ticker = None;
                if should_count(*visible, *done) {
                    if let Some(mut counter) = CounterAnimation::from_label(&label) {
                        // The interval is dropped by this effect's cleanup once
                        // `finished` flips, never from inside its own callback.
                        ticker = Some(Interval::new(TICK_MS, move || {
                            let more = counter.tick();
                            shown.set(counter.text());
                            if !more {
                                finished.set(true);
                            }
                        }));
                    }
                }
                move || drop(ticker)
            },
            (visible, done),
        );
    }

    html! {
        <div class="stat-item">
            <span ref={node} class="stat-number">{ (*shown).clone() }</span>
            <span class="stat-label">{ props.caption.clone() }</span>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(label: &str) -> (Vec<String>, usize) {
        let mut counter = CounterAnimation::from_label(label).unwrap();
        let mut frames = Vec::new();
        let mut ticks = 0;
        loop {
            ticks += 1;
            let more = counter.tick();
            frames.push(counter.text());
            if !more {
                break;
            }
        }
        (frames, ticks)
    }

    #[test]
    fn counts_up_to_target_with_suffix() {
        let (frames, ticks) = run("500+");
        assert_eq!(frames.last().map(String::as_str), Some("500+"));
        assert_eq!(ticks, 125);
        assert_eq!(frames[0], "4+");
    }

    #[test]
    fn percent_labels_keep_percent() {
        let (frames, _) = run("98%");
        assert_eq!(frames.last().map(String::as_str), Some("98%"));
        assert!(frames.iter().all(|f| f.ends_with('%')));
    }

    #[test]
    fn values_never_decrease() {
        let (frames, _) = run("1200+");
        let values: Vec<u64> = frames
            .iter()
            .map(|f| f.trim_end_matches('+').parse().unwrap())
            .collect();
        assert!(values.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn counting_starts_on_sight_and_stops_once_finished() {
        assert!(!should_count(false, false));
        assert!(should_count(true, false));
        assert!(!should_count(true, true));
        assert!(!should_count(false, true));
    }

    #[test]
    fn labels_without_digits_are_left_alone() {
        assert!(CounterAnimation::from_label("Many").is_none());
    }
}
