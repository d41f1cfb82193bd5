pub struct Subject {
    pub id: &'static str,
    pub name: &'static str,
    pub price: u32,
}

/// DGCA CPL ground subjects offered individually, prices in INR.
pub const SUBJECTS: &[Subject] = &[
    Subject { id: "navigation", name: "Air Navigation", price: 35_000 },
    Subject { id: "meteorology", name: "Aviation Meteorology", price: 30_000 },
    Subject { id: "regulations", name: "Air Regulations", price: 25_000 },
    Subject { id: "technical-general", name: "Technical General", price: 30_000 },
    Subject { id: "technical-specific", name: "Technical Specific", price: 25_000 },
    Subject { id: "rtr", name: "Radio Telephony (RTR)", price: 20_000 },
];

pub const PACKAGE_NAME: &str = "Complete CPL Package";
pub const PACKAGE_PRICE: u32 = 150_000;

/// Checked flag per catalog entry, in catalog order.
#[derive(Clone, Debug, PartialEq)]
pub struct Selection {
    checked: Vec<bool>,
}

impl Selection {
    pub fn empty(len: usize) -> Self {
        Self { checked: vec![false; len] }
    }

    pub fn is_checked(&self, index: usize) -> bool {
        self.checked.get(index).copied().unwrap_or(false)
    }

    pub fn set(&mut self, index: usize, checked: bool) {
        if let Some(slot) = self.checked.get_mut(index) {
            *slot = checked;
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Quote {
    pub total: u32,
    pub subjects: Vec<&'static str>,
}

/// Recomputes everything from the current selection.
pub fn quote(catalog: &[Subject], selection: &Selection) -> Quote {
    let chosen: Vec<&Subject> = catalog
        .iter()
        .enumerate()
        .filter(|(i, _)| selection.is_checked(*i))
        .map(|(_, subject)| subject)
        .collect();
    Quote {
        total: chosen.iter().map(|s| s.price).sum(),
        subjects: chosen.iter().map(|s| s.name).collect(),
    }
}

impl Quote {
    pub fn count(&self) -> usize {
        self.subjects.len()
    }

    pub fn can_enroll(&self) -> bool {
        !self.subjects.is_empty()
    }

    pub fn enroll_label(&self) -> String {
        match self.count() {
            0 => "Select Subjects First".to_string(),
            1 => "Enroll in 1 Subject".to_string(),
            n => format!("Enroll in {} Subjects", n),
        }
    }

    pub fn summary(&self) -> String {
        selection_summary(&self.subjects.join(", "), self.total)
    }
}

pub fn selection_summary(what: &str, total: u32) -> String {
    format!("Selected: {} - Total: ₹{}", what, format_inr(u64::from(total)))
}

/// Formats with Indian digit grouping: the last three digits, then pairs.
pub fn format_inr(amount: u64) -> String {
    let digits = amount.to_string();
    if digits.len() <= 3 {
        return digits;
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn select(indices: &[usize]) -> Selection {
        let mut selection = Selection::empty(SUBJECTS.len());
        for &i in indices {
            selection.set(i, true);
        }
        selection
    }

    #[test]
    fn indian_grouping() {
        assert_eq!(format_inr(0), "0");
        assert_eq!(format_inr(999), "999");
        assert_eq!(format_inr(1_000), "1,000");
        assert_eq!(format_inr(150_000), "1,50,000");
        assert_eq!(format_inr(1_234_567), "12,34,567");
        assert_eq!(format_inr(123_456_789), "12,34,56,789");
    }

    #[test]
    fn total_is_sum_of_checked_prices() {
        for picks in [vec![], vec![0], vec![1, 3], vec![0, 1, 2, 3, 4, 5]] {
            let q = quote(SUBJECTS, &select(&picks));
            let expected: u32 = picks.iter().map(|&i| SUBJECTS[i].price).sum();
            assert_eq!(q.total, expected);
            assert_eq!(q.count(), picks.len());
        }
    }

    #[test]
    fn enroll_disabled_iff_nothing_selected() {
        let none = quote(SUBJECTS, &select(&[]));
        assert!(!none.can_enroll());
        assert_eq!(none.enroll_label(), "Select Subjects First");

        let one = quote(SUBJECTS, &select(&[2]));
        assert!(one.can_enroll());
        assert_eq!(one.enroll_label(), "Enroll in 1 Subject");

        let two = quote(SUBJECTS, &select(&[2, 4]));
        assert_eq!(two.enroll_label(), "Enroll in 2 Subjects");
    }

    #[test]
    fn unchecking_recomputes_from_scratch() {
        let mut selection = select(&[0, 1]);
        selection.set(0, false);
        let q = quote(SUBJECTS, &selection);
        assert_eq!(q.total, SUBJECTS[1].price);
        assert_eq!(q.subjects, vec!["Aviation Meteorology"]);
    }

    #[test]
    fn out_of_range_index_is_ignored() {
        let mut selection = Selection::empty(2);
        selection.set(7, true);
        assert!(!selection.is_checked(7));
    }

    #[test]
    fn summary_lists_subjects_and_total() {
        let q = quote(SUBJECTS, &select(&[0, 5]));
        assert_eq!(q.summary(), "Selected: Air Navigation, Radio Telephony (RTR) - Total: ₹55,000");
        assert_eq!(
            selection_summary(PACKAGE_NAME, PACKAGE_PRICE),
            "Selected: Complete CPL Package - Total: ₹1,50,000"
        );
    }
}
