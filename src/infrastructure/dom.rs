//! DOM element class manipulation.
//!
//! The UI layer hands these helpers an opaque mutable element whose only
//! relevant attribute is its `class` string; [`ClassedElement`] is that
//! seam. Class membership is whitespace-delimited: `has_class` never
//! matches a substring of another class name.

#[cfg(feature = "html")]
use scraper::Html;

/// Opaque mutable handle to an element with a class attribute.
pub trait ClassedElement {
    /// The element's current class string.
    fn class_name(&self) -> &str;

    /// Replace the element's class string.
    fn set_class_name(&mut self, value: String);
}

/// Whether the element's class string contains `class` as a
/// whitespace-delimited word.
pub fn has_class<E>(element: &E, class: &str) -> bool
where
    E: ClassedElement + ?Sized,
{
    !class.is_empty() && delimited_range(element.class_name(), class).is_some()
}

/// Add `class` to the element unless already present.
pub fn add_class<E>(element: &mut E, class: &str)
where
    E: ClassedElement + ?Sized,
{
    if class.is_empty() || has_class(element, class) {
        return;
    }
    let mut value = element.class_name().to_owned();
    if !value.is_empty() {
        value.push(' ');
    }
    value.push_str(class);
    element.set_class_name(value);
}

/// Remove a delimited occurrence of `class` from the element.
pub fn remove_class<E>(element: &mut E, class: &str)
where
    E: ClassedElement + ?Sized,
{
    if class.is_empty() {
        return;
    }
    let current = element.class_name().to_owned();
    if let Some((begin, end)) = delimited_range(&current, class) {
        // Swallow one adjacent whitespace char on each side, leaving a
        // single space where the class was.
        let mut begin = begin;
        let mut end = end;
        if let Some(c) = current[..begin].chars().next_back() {
            if c.is_whitespace() {
                begin -= c.len_utf8();
            }
        }
        if let Some(c) = current[end..].chars().next() {
            if c.is_whitespace() {
                end += c.len_utf8();
            }
        }
        let replaced = format!("{} {}", &current[..begin], &current[end..]);
        element.set_class_name(replaced.trim().to_owned());
    }
}

/// Remove `class` when present, add it otherwise.
pub fn toggle_class<E>(element: &mut E, class: &str)
where
    E: ClassedElement + ?Sized,
{
    if class.is_empty() {
        return;
    }
    if has_class(element, class) {
        remove_class(element, class);
    } else {
        add_class(element, class);
    }
}

/// Extract the text content of an HTML fragment.
#[cfg(feature = "html")]
pub fn html_to_text(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    fragment.root_element().text().collect()
}

/// Byte range of a whitespace-delimited occurrence of `class` in
/// `haystack`, if any.
fn delimited_range(haystack: &str, class: &str) -> Option<(usize, usize)> {
    let mut from = 0;
    while let Some(pos) = haystack[from..].find(class) {
        let begin = from + pos;
        let end = begin + class.len();
        let before_ok = haystack[..begin]
            .chars()
            .next_back()
            .map_or(true, char::is_whitespace);
        let after_ok = haystack[end..]
            .chars()
            .next()
            .map_or(true, char::is_whitespace);
        if before_ok && after_ok {
            return Some((begin, end));
        }
        from = end;
    }
    None
}
