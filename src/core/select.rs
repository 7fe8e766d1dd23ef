//! Turn a keyword search plus an optional 1-based pick into one record id.

use crate::errors::{AppError, AppResult};
use crate::models::Record;

pub fn resolve<T: Record>(matches: &[T], pick: Option<usize>) -> AppResult<i64> {
    match (matches.len(), pick) {
        (0, _) => Err(AppError::InvalidSelection(format!(
            "no {} matches the keyword",
            T::ENTITY
        ))),
        (len, Some(n)) if n == 0 || n > len => Err(AppError::InvalidSelection(format!(
            "pick {n} is out of range 1..={len}"
        ))),
        (_, Some(n)) => Ok(matches[n - 1].id()),
        (1, None) => Ok(matches[0].id()),
        (len, None) => Err(AppError::InvalidSelection(format!(
            "{len} {} records match; choose one with --pick <N>",
            T::ENTITY
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Note;

    fn note(id: i64) -> Note {
        Note {
            id,
            uuid: format!("u{id}"),
            name: format!("n{id}"),
            content: String::new(),
            modified_at: String::new(),
        }
    }

    #[test]
    fn single_match_needs_no_pick() {
        assert_eq!(resolve(&[note(4)], None).unwrap(), 4);
    }

    #[test]
    fn pick_is_one_based() {
        let notes = [note(4), note(9), note(12)];
        assert_eq!(resolve(&notes, Some(1)).unwrap(), 4);
        assert_eq!(resolve(&notes, Some(3)).unwrap(), 12);
    }

    #[test]
    fn out_of_range_and_ambiguous_are_rejected() {
        let notes = [note(4), note(9)];
        for pick in [Some(0), Some(3), None] {
            assert!(matches!(
                resolve(&notes, pick),
                Err(AppError::InvalidSelection(_))
            ));
        }
        let none: [Note; 0] = [];
        assert!(matches!(
            resolve(&none, Some(1)),
            Err(AppError::InvalidSelection(_))
        ));
    }
}
