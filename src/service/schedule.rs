use chrono::{Datelike, NaiveDate, NaiveDateTime};

use crate::models::appointment::Appointment;

/// Listing page size for the appointments view.
pub const APPOINTMENT_PAGE_SIZE: usize = 14;

/// Advisory conflict check for a proposed `[candidate_start, candidate_end)`
/// interval. Exclusive at the touching boundary: back-to-back appointments do
/// not conflict. `exclude_id` skips the appointment being edited in place.
///
/// The caller must have validated `candidate_end > candidate_start` already.
/// Linear scan; per-shelter appointment counts stay small.
pub fn overlaps(
    candidate_start: NaiveDateTime,
    candidate_end: NaiveDateTime,
    existing: &[Appointment],
    exclude_id: Option<i64>,
) -> bool {
    existing.iter().any(|appointment| {
        if exclude_id == Some(appointment.id) {
            return false;
        }
        candidate_start < appointment.ends_at && candidate_end > appointment.starts_at
    })
}

/// Upcoming appointments first (soonest first), expired ones after them. The
/// expired bucket is also sorted ascending by start, oldest first; an earlier
/// revision of the product sorted it descending, ascending is the confirmed
/// behaviour. Note the result is deliberately not one global chronological
/// sort.
pub fn order_for_display(appointments: &[Appointment], now: NaiveDateTime) -> Vec<Appointment> {
    let (mut future, mut past): (Vec<Appointment>, Vec<Appointment>) = appointments
        .iter()
        .cloned()
        .partition(|appointment| appointment.ends_at >= now);
    future.sort_by_key(|appointment| appointment.starts_at);
    past.sort_by_key(|appointment| appointment.starts_at);
    future.extend(past);
    future
}

/// Independently optional calendar components; an appointment matches when
/// every present component equals the corresponding part of its start.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateFilter {
    pub day: Option<u32>,
    pub month: Option<u32>,
    pub year: Option<i32>,
}

impl DateFilter {
    /// Filter pinned to one concrete date; the view defaults to today.
    pub fn on(date: NaiveDate) -> DateFilter {
        DateFilter {
            day: Some(date.day()),
            month: Some(date.month()),
            year: Some(date.year()),
        }
    }

    pub fn matches(&self, at: NaiveDateTime) -> bool {
        self.day.is_none_or(|day| at.day() == day)
            && self.month.is_none_or(|month| at.month() == month)
            && self.year.is_none_or(|year| at.year() == year)
    }

    /// When all three components are set they must name a date that exists on
    /// the calendar (no 31st of February). Partial filters are always fine.
    pub fn names_real_date(&self) -> bool {
        match (self.day, self.month, self.year) {
            (Some(day), Some(month), Some(year)) => {
                NaiveDate::from_ymd_opt(year, month, day).is_some()
            }
            _ => true,
        }
    }
}

pub fn filter_by_date_parts(appointments: &[Appointment], filter: &DateFilter) -> Vec<Appointment> {
    appointments
        .iter()
        .filter(|appointment| filter.matches(appointment.starts_at))
        .cloned()
        .collect()
}

/// Distinct start years present in the data, newest first. Feeds the year
/// filter options.
pub fn distinct_years(appointments: &[Appointment]) -> Vec<i32> {
    let mut years: Vec<i32> = appointments
        .iter()
        .map(|appointment| appointment.starts_at.year())
        .collect();
    years.sort_unstable_by(|a, b| b.cmp(a));
    years.dedup();
    years
}

#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// The page actually served, after clamping.
    pub number: usize,
    pub total_pages: usize,
}

/// Fixed-size windowing. The requested page is clamped to the valid range;
/// an empty list still has one (empty) page.
pub fn paginate<T: Clone>(items: &[T], page_size: usize, requested: usize) -> Page<T> {
    let total_pages = items.len().div_ceil(page_size).max(1);
    let number = requested.clamp(1, total_pages);
    let start = (number - 1) * page_size;
    Page {
        items: items.iter().skip(start).take(page_size).cloned().collect(),
        number,
        total_pages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn appointment(id: i64, start: (u32, u32), end: (u32, u32)) -> Appointment {
        let day = NaiveDate::from_ymd_opt(2025, 8, 1).unwrap();
        Appointment {
            id,
            title: format!("cita {id}"),
            description: String::new(),
            starts_at: day.and_hms_opt(start.0, start.1, 0).unwrap(),
            ends_at: day.and_hms_opt(end.0, end.1, 0).unwrap(),
            adopter_id: 1,
        }
    }

    fn on_day(id: i64, month: u32, day: u32) -> Appointment {
        let date = NaiveDate::from_ymd_opt(2025, month, day).unwrap();
        Appointment {
            id,
            title: String::new(),
            description: String::new(),
            starts_at: date.and_hms_opt(10, 0, 0).unwrap(),
            ends_at: date.and_hms_opt(11, 0, 0).unwrap(),
            adopter_id: 1,
        }
    }

    #[test]
    fn detects_partial_overlap() {
        let existing = vec![appointment(1, (10, 0), (11, 0))];
        let day = NaiveDate::from_ymd_opt(2025, 8, 1).unwrap();
        assert!(overlaps(
            day.and_hms_opt(10, 30, 0).unwrap(),
            day.and_hms_opt(11, 30, 0).unwrap(),
            &existing,
            None,
        ));
    }

    #[test]
    fn touching_intervals_do_not_conflict() {
        let existing = vec![appointment(1, (11, 0), (12, 0))];
        let day = NaiveDate::from_ymd_opt(2025, 8, 1).unwrap();
        assert!(!overlaps(
            day.and_hms_opt(10, 0, 0).unwrap(),
            day.and_hms_opt(11, 0, 0).unwrap(),
            &existing,
            None,
        ));
        assert!(overlaps(
            day.and_hms_opt(10, 0, 0).unwrap(),
            day.and_hms_opt(11, 1, 0).unwrap(),
            &existing,
            None,
        ));
    }

    #[test]
    fn overlap_is_symmetric() {
        let day = NaiveDate::from_ymd_opt(2025, 8, 1).unwrap();
        let pairs = [
            ((9, 0), (10, 0), (10, 0), (11, 0)),
            ((9, 0), (10, 30), (10, 0), (11, 0)),
            ((9, 0), (12, 0), (10, 0), (11, 0)),
        ];
        for (a_start, a_end, b_start, b_end) in pairs {
            let a = vec![appointment(1, a_start, a_end)];
            let b = vec![appointment(1, b_start, b_end)];
            let forwards = overlaps(
                day.and_hms_opt(b_start.0, b_start.1, 0).unwrap(),
                day.and_hms_opt(b_end.0, b_end.1, 0).unwrap(),
                &a,
                None,
            );
            let backwards = overlaps(
                day.and_hms_opt(a_start.0, a_start.1, 0).unwrap(),
                day.and_hms_opt(a_end.0, a_end.1, 0).unwrap(),
                &b,
                None,
            );
            assert_eq!(forwards, backwards);
        }
    }

    #[test]
    fn excluded_id_is_ignored_when_editing() {
        let existing = vec![appointment(7, (10, 0), (11, 0))];
        let day = NaiveDate::from_ymd_opt(2025, 8, 1).unwrap();
        assert!(!overlaps(
            day.and_hms_opt(10, 15, 0).unwrap(),
            day.and_hms_opt(10, 45, 0).unwrap(),
            &existing,
            Some(7),
        ));
    }

    #[test]
    fn empty_list_never_conflicts() {
        let day = NaiveDate::from_ymd_opt(2025, 8, 1).unwrap();
        assert!(!overlaps(
            day.and_hms_opt(10, 0, 0).unwrap(),
            day.and_hms_opt(11, 0, 0).unwrap(),
            &[],
            None,
        ));
    }

    #[test]
    fn future_first_then_past_both_ascending() {
        let now = NaiveDate::from_ymd_opt(2025, 8, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let list = vec![
            appointment(1, (8, 0), (9, 0)),   // past
            appointment(2, (15, 0), (16, 0)), // future
            appointment(3, (6, 0), (7, 0)),   // past, earliest
            appointment(4, (13, 0), (14, 0)), // future, soonest
        ];
        let ordered = order_for_display(&list, now);
        let ids: Vec<i64> = ordered.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![4, 2, 3, 1]);
    }

    #[test]
    fn empty_filter_is_identity() {
        let list = vec![on_day(1, 3, 5), on_day(2, 4, 5)];
        let filtered = filter_by_date_parts(&list, &DateFilter::default());
        assert_eq!(filtered, list);
    }

    #[test]
    fn month_only_filter() {
        let list = vec![on_day(1, 3, 5), on_day(2, 4, 5)];
        let filter = DateFilter { month: Some(3), ..DateFilter::default() };
        let filtered = filter_by_date_parts(&list, &filter);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, 1);
    }

    #[test]
    fn impossible_complete_date_is_flagged() {
        let filter = DateFilter { day: Some(31), month: Some(2), year: Some(2025) };
        assert!(!filter.names_real_date());
        let partial = DateFilter { day: Some(31), month: Some(2), year: None };
        assert!(partial.names_real_date());
    }

    #[test]
    fn pagination_clamps_out_of_range_pages() {
        let items: Vec<u32> = (0..25).collect();
        let page = paginate(&items, 10, 5);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.number, 3);
        assert_eq!(page.items, vec![20, 21, 22, 23, 24]);

        let first = paginate(&items, 10, 0);
        assert_eq!(first.number, 1);
        assert_eq!(first.items.len(), 10);
    }

    #[test]
    fn empty_list_paginates_to_one_empty_page() {
        let page = paginate::<u32>(&[], 10, 3);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.number, 1);
        assert!(page.items.is_empty());
    }

    #[test]
    fn distinct_years_descending() {
        let mut list = vec![on_day(1, 3, 5), on_day(2, 4, 5)];
        list[0].starts_at = NaiveDate::from_ymd_opt(2023, 3, 5)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        list.push(on_day(3, 5, 6));
        assert_eq!(distinct_years(&list), vec![2025, 2023]);
    }
}
