use std::fmt::{Display, Write};

use maud::{Escaper, Render};

/// Floating-point number rounded for display, with the exact value in the title.
pub struct Float<T> {
    value: T,
    precision: usize,
}

impl<T> From<T> for Float<T> {
    fn from(value: T) -> Self {
        Self {
            value,
            precision: 0,
        }
    }
}

impl<T> Float<T> {
    pub fn precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }
}

impl<T: Display> Render for Float<T> {
    fn render_to(&self, buffer: &mut String) {
        buffer.push_str(r#"<span title=""#);
        let _ = write!(Escaper::new(buffer), "{}", self.value);
        buffer.push_str(r#"">"#);
        let _ = write!(Escaper::new(buffer), "{0:.1$}", self.value, self.precision);
        buffer.push_str("</span>");
    }
}

#[cfg(test)]
mod tests {
    use maud::html;

    use super::*;

    #[test]
    fn render_ok() {
        let markup = html! { (Float::from(66.666_f64).precision(1)) };
        assert_eq!(markup.into_string(), r#"<span title="66.666">66.7</span>"#);
    }
}
