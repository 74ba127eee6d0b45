//! Namespace-aware helpers over a parsed feed document.

use roxmltree::Node;

/// Atom syndication namespace (the default namespace of feed documents).
pub const ATOM_NS: &str = "http://www.w3.org/2005/Atom";

/// Provider analytics vocabulary (`dxp:` elements).
pub const ANALYTICS_NS: &str = "http://schemas.google.com/analytics/2009";

/// Paging/result-count vocabularies.
pub const OPENSEARCH_NS: [&str; 2] = [
    "http://a9.com/-/spec/opensearchrss/1.0/",
    "http://a9.com/-/spec/opensearch/1.1/",
];

/// Prefix carried by names in the feed.
const NAME_PREFIX: &str = "ga:";

/// Strip the `ga:` prefix from a feed name.
pub fn strip_prefix(name: &str) -> &str {
    name.strip_prefix(NAME_PREFIX).unwrap_or(name)
}

fn is_atom(node: &Node<'_, '_>) -> bool {
    matches!(node.tag_name().namespace(), None | Some(ATOM_NS))
}

/// First Atom child element named `name`.
pub fn atom_child<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children()
        .find(|n| n.is_element() && is_atom(n) && n.tag_name().name() == name)
}

/// Atom child elements named `name`.
pub fn atom_children<'a, 'input: 'a>(
    node: Node<'a, 'input>,
    name: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    node.children()
        .filter(move |n| n.is_element() && is_atom(n) && n.tag_name().name() == name)
}

/// First analytics child element named `name`.
pub fn ga_child<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|n| {
        n.is_element()
            && n.tag_name().namespace() == Some(ANALYTICS_NS)
            && n.tag_name().name() == name
    })
}

/// Analytics child elements named `name`.
pub fn ga_children<'a, 'input: 'a>(
    node: Node<'a, 'input>,
    name: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    node.children().filter(move |n| {
        n.is_element()
            && n.tag_name().namespace() == Some(ANALYTICS_NS)
            && n.tag_name().name() == name
    })
}

/// Child elements in either opensearch namespace.
pub fn opensearch_children<'a, 'input: 'a>(
    node: Node<'a, 'input>,
) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    node.children().filter(|n| {
        n.is_element()
            && n
                .tag_name()
                .namespace()
                .is_some_and(|ns| OPENSEARCH_NS.contains(&ns))
    })
}

/// Trimmed text content of an element, empty if it has none.
pub fn text(node: Node<'_, '_>) -> String {
    node.text().unwrap_or_default().trim().to_string()
}

/// The `(name, value)` attribute pair of a `dxp:property`, `dxp:metric` or
/// `dxp:dimension` element, with the name prefix stripped.
pub fn name_value<'a>(node: Node<'a, '_>) -> Option<(&'a str, &'a str)> {
    let name = node.attribute("name")?;
    let value = node.attribute("value").unwrap_or_default();
    Some((strip_prefix(name), value))
}
