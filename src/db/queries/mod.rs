//! Parameterized SQL for each record table. Functions take a `&Connection`
//! so they run equally on a plain connection or inside a transaction.

pub mod appointments;
pub mod hours;
pub mod notes;
pub mod todos;

/// Build a `LIKE ... ESCAPE '\'` pattern matching `keyword` as a literal substring.
pub fn like_pattern(keyword: &str) -> String {
    let mut out = String::with_capacity(keyword.len() + 2);
    out.push('%');
    for c in keyword.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('%');
    out
}
