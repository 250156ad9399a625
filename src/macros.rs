/// Builds a [`Line`](crate::Line) from a name, an optional info and named
/// children.
///
/// Values go through `Into<Value>`, so strings are display text and numbers,
/// booleans and datetimes keep their type. The storage strategy is inferred
/// from the binding.
///
/// # Examples
///
/// ```rust
/// use lineput::{lps_line, Line, Ordered};
///
/// let line: Line<Ordered> = lps_line!("player" => "Alex", {
///     "level": 3,
///     "alive": true,
///     "motto": "fast, quiet",
/// });
/// assert_eq!(
///     line.to_string(),
///     "player#Alex:|level#3:|alive#true:|motto#fast/com quiet:|"
/// );
/// ```
#[macro_export]
macro_rules! lps_line {
    ($name:expr) => {
        $crate::Line::new($name)
    };

    ($name:expr, { $($key:literal : $value:expr),* $(,)? }) => {{
        let mut line = $crate::Line::new($name);
        line.extend([$($crate::Sub::with_value($key, $value)),*]);
        line
    }};

    ($name:expr => $info:expr) => {{
        let mut line = $crate::Line::new($name);
        $crate::Record::set_value(&mut line, $crate::Value::from($info));
        line
    }};

    ($name:expr => $info:expr, { $($key:literal : $value:expr),* $(,)? }) => {{
        let mut line = $crate::Line::new($name);
        $crate::Record::set_value(&mut line, $crate::Value::from($info));
        line.extend([$($crate::Sub::with_value($key, $value)),*]);
        line
    }};
}
