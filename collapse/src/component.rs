use livedom::Element;

use crate::update::Props;

/// Anything that turns a property bag into an element description.
///
/// Closures of the right shape are components:
///
/// ```
/// use collapse::{Component, Props};
/// use livedom::Element;
///
/// let greeting = |props: &Props| {
///     let name = props.get("name").and_then(|v| v.as_str()).unwrap_or("world");
///     Element::text(format!("hello {name}"))
/// };
/// let element = greeting.render(&Props::new());
/// assert_eq!(element.content, livedom::Content::Text("hello world".into()));
/// ```
pub trait Component: Send + Sync + 'static {
    fn render(&self, props: &Props) -> Element;
}

impl<F> Component for F
where
    F: Fn(&Props) -> Element + Send + Sync + 'static,
{
    fn render(&self, props: &Props) -> Element {
        self(props)
    }
}
