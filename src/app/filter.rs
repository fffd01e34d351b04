//! Name matching over the user directory.
//!
//! The live filter is a case-insensitive substring match; committing the
//! search with Enter uses a case-insensitive exact match instead.

use crate::domain::UserRecord;

/// Returns the users whose name contains `query`, ignoring case.
///
/// Relative order is preserved and an empty query matches everyone.
#[must_use]
pub fn filter_users<'a>(users: &'a [UserRecord], query: &str) -> Vec<&'a UserRecord> {
    if query.is_empty() {
        return users.iter().collect();
    }

    let needle = query.to_lowercase();
    users
        .iter()
        .filter(|user| user.name.to_lowercase().contains(&needle))
        .collect()
}

/// Returns the first user whose name equals `query`, ignoring case.
#[must_use]
pub fn find_exact<'a>(users: &'a [UserRecord], query: &str) -> Option<&'a UserRecord> {
    let needle = query.to_lowercase();
    users.iter().find(|user| user.name.to_lowercase() == needle)
}

/// Character range of the first case-insensitive occurrence of `query` in
/// `name`, as `(start, end)` with an exclusive end.
///
/// Returns `None` when there is no match, when the query is empty, or when
/// lowercasing changes the character count of `name` (the offsets would no
/// longer line up with the displayed text).
#[must_use]
pub fn match_range(name: &str, query: &str) -> Option<(usize, usize)> {
    if query.is_empty() {
        return None;
    }

    let lowered = name.to_lowercase();
    if lowered.chars().count() != name.chars().count() {
        return None;
    }

    let byte_start = lowered.find(&query.to_lowercase())?;
    let start = lowered[..byte_start].chars().count();
    Some((start, start + query.to_lowercase().chars().count()))
}

#[cfg(test)]
mod tests {
    use super::{filter_users, find_exact, match_range};
    use crate::domain::UserRecord;

    fn directory() -> Vec<UserRecord> {
        vec![
            UserRecord::new(1, "Ann"),
            UserRecord::new(2, "Bob"),
            UserRecord::new(3, "Anna"),
        ]
    }

    fn names<'a>(users: &[&'a UserRecord]) -> Vec<&'a str> {
        users.iter().map(|u| u.name.as_str()).collect()
    }

    #[test]
    fn substring_match_ignores_case_and_keeps_order() {
        let users = directory();
        assert_eq!(names(&filter_users(&users, "an")), ["Ann", "Anna"]);
        assert_eq!(names(&filter_users(&users, "NN")), ["Ann", "Anna"]);
        assert_eq!(names(&filter_users(&users, "o")), ["Bob"]);
    }

    #[test]
    fn empty_query_returns_everyone() {
        let users = directory();
        assert_eq!(names(&filter_users(&users, "")), ["Ann", "Bob", "Anna"]);
    }

    #[test]
    fn filtered_view_is_an_ordered_subsequence() {
        let users = directory();
        for query in ["a", "n", "b", "x", "ANNA", "nn"] {
            let filtered = filter_users(&users, query);
            let mut cursor = users.iter();
            for user in &filtered {
                assert!(cursor.any(|u| u == *user), "{query}: order broken");
                assert!(user.name.to_lowercase().contains(&query.to_lowercase()));
            }
        }
    }

    #[test]
    fn exact_match_requires_whole_name() {
        let users = directory();
        assert_eq!(find_exact(&users, "bob").map(|u| u.id), Some(2));
        assert_eq!(find_exact(&users, "ANNA").map(|u| u.id), Some(3));
        assert!(find_exact(&users, "an").is_none());
        assert!(find_exact(&users, "").is_none());
    }

    #[test]
    fn exact_match_picks_first_in_list_order() {
        let users = vec![
            UserRecord::new(10, "Sam"),
            UserRecord::new(11, "SAM"),
        ];
        assert_eq!(find_exact(&users, "sam").map(|u| u.id), Some(10));
    }

    #[test]
    fn match_range_uses_character_offsets() {
        assert_eq!(match_range("Anna", "nn"), Some((1, 3)));
        assert_eq!(match_range("Zoë Ann", "ANN"), Some((4, 7)));
        assert_eq!(match_range("Bob", "x"), None);
        assert_eq!(match_range("Bob", ""), None);
    }
}
