//! Inclusive frequency filtering.
//!
//! An inspection with frequency F includes an activity A when
//! `F.in_months() % A.frequency.in_months() == 0`.
//!
//! Example: a 12-month inspection includes activities due every 1, 2, 3, 4,
//! 6 or 12 months; a 6-month inspection includes 1, 2, 3 and 6 but not 5.

use crate::models::{Activity, Frequency};

/// Activities included in the selected frequency, sorted ascending by
/// `(frequency.in_months(), sequence)`.
///
/// The ordering is a hard contract: it determines row order in the generated
/// sheet and the 1-based row numbers used for PDF form field names.
pub fn filter_by_frequency(activities: &[Activity], selected: &Frequency) -> Vec<Activity> {
    let target = selected.in_months();
    let mut included: Vec<Activity> = activities
        .iter()
        .filter(|a| target % a.frequency.in_months() == 0)
        .cloned()
        .collect();
    included.sort_by_key(|a| (a.frequency.in_months(), a.sequence));
    included
}

/// Distinct frequencies present among the activities' own cadences,
/// deduplicated by month-equivalent value (first occurrence keeps its display
/// label) and sorted ascending.
///
/// This is what populates the selectable frequency options for an
/// installation; the options derive from activity cadences, not from an
/// independent catalog.
pub fn available_frequencies(activities: &[Activity]) -> Vec<Frequency> {
    let mut seen: Vec<Frequency> = Vec::new();
    for activity in activities {
        if !seen.iter().any(|f| f.in_months() == activity.frequency.in_months()) {
            seen.push(activity.frequency);
        }
    }
    seen.sort_by_key(Frequency::in_months);
    seen
}

#[cfg(test)]
mod tests {
    use super::*;

    fn activity(sequence: u32, frequency: Frequency) -> Activity {
        Activity {
            sequence,
            kind: None,
            description: None,
            frequency,
        }
    }

    #[test]
    fn test_twelve_months_includes_all_divisors() {
        let activities = vec![
            activity(4, Frequency::months(12).unwrap()),
            activity(3, Frequency::months(6).unwrap()),
            activity(2, Frequency::months(3).unwrap()),
            activity(1, Frequency::months(1).unwrap()),
        ];
        let out = filter_by_frequency(&activities, &Frequency::months(12).unwrap());
        let months: Vec<u32> = out.iter().map(|a| a.frequency.in_months()).collect();
        assert_eq!(months, vec![1, 3, 6, 12]);
    }

    #[test]
    fn test_six_months_excludes_five_month_cadence() {
        let activities = vec![
            activity(1, Frequency::months(1).unwrap()),
            activity(2, Frequency::months(2).unwrap()),
            activity(3, Frequency::months(5).unwrap()),
        ];
        let out = filter_by_frequency(&activities, &Frequency::months(6).unwrap());
        let months: Vec<u32> = out.iter().map(|a| a.frequency.in_months()).collect();
        assert_eq!(months, vec![1, 2]);
    }

    #[test]
    fn test_ties_break_by_sequence() {
        let activities = vec![
            activity(9, Frequency::months(3).unwrap()),
            activity(2, Frequency::months(3).unwrap()),
            activity(5, Frequency::months(3).unwrap()),
        ];
        let out = filter_by_frequency(&activities, &Frequency::months(3).unwrap());
        let seqs: Vec<u32> = out.iter().map(|a| a.sequence).collect();
        assert_eq!(seqs, vec![2, 5, 9]);
    }

    #[test]
    fn test_one_year_bucket_matches_twelve_months() {
        let activities = vec![activity(1, Frequency::years(1).unwrap())];
        let out = filter_by_frequency(&activities, &Frequency::months(12).unwrap());
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn test_empty_activity_list_filters_to_empty() {
        assert!(filter_by_frequency(&[], &Frequency::months(6).unwrap()).is_empty());
    }

    #[test]
    fn test_available_frequencies_dedup_and_order() {
        let activities = vec![
            activity(1, Frequency::years(1).unwrap()),
            activity(2, Frequency::months(6).unwrap()),
            activity(3, Frequency::months(12).unwrap()),
            activity(4, Frequency::months(1).unwrap()),
        ];
        let options = available_frequencies(&activities);
        let months: Vec<u32> = options.iter().map(Frequency::in_months).collect();
        assert_eq!(months, vec![1, 6, 12]);
        // First occurrence wins the label: the year spelling came first.
        assert_eq!(options[2].label(), "1 Anno");
    }
}
