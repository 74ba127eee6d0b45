//! Feed document to entry mapping.

use crate::error::FeedError;
use crate::xml::{
    atom_child, atom_children, ga_child, ga_children, name_value, opensearch_children, text,
};
use ganalytics_core::{
    classify_metric, parse_leading_int, AccountEntry, AggregateMetrics, FeedRootMetadata,
    ReportEntry, Value, ValueMap,
};
use roxmltree::{Document, Node};

/// A mapped account feed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AccountFeed {
    /// Feed-level fields.
    pub root: FeedRootMetadata,
    /// One entry per account profile.
    pub entries: Vec<AccountEntry>,
}

/// A mapped report feed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportFeed {
    /// Feed-level fields, including data-source properties.
    pub root: FeedRootMetadata,
    /// Totals over the whole result set.
    pub aggregates: AggregateMetrics,
    /// One entry per report row.
    pub entries: Vec<ReportEntry>,
}

fn parse(xml: &str) -> Result<Document<'_>, FeedError> {
    let doc = Document::parse(xml)?;
    let root = doc.root_element();
    if root.tag_name().name() != "feed" {
        return Err(FeedError::UnexpectedRoot(root.tag_name().name().to_string()));
    }
    Ok(doc)
}

/// Fields shared by account and report feeds: update time, generator and
/// the opensearch paging fields.
fn common_root_fields(feed: Node<'_, '_>) -> ValueMap {
    let mut fields = ValueMap::new();
    let updated = atom_child(feed, "updated").map(text).unwrap_or_default();
    fields.insert("updated", updated);

    let generator = atom_child(feed, "generator");
    fields.insert("generator", generator.map(text).unwrap_or_default());
    let version = generator
        .and_then(|g| g.attribute("version"))
        .unwrap_or_default();
    fields.insert("generatorVersion", version);

    for node in opensearch_children(feed) {
        fields.insert(
            node.tag_name().name(),
            Value::Integer(parse_leading_int(&text(node))),
        );
    }
    fields
}

fn ga_text(feed: Node<'_, '_>, name: &str) -> Option<String> {
    ga_child(feed, name).map(text)
}

/// Map an account feed document.
pub fn map_account_feed(xml: &str) -> Result<AccountFeed, FeedError> {
    let doc = parse(xml)?;
    let feed = doc.root_element();

    let mut fields = common_root_fields(feed);
    for key in ["startDate", "endDate"] {
        if let Some(date) = ga_text(feed, key) {
            fields.insert(key, date);
        }
    }

    let entries: Vec<AccountEntry> = atom_children(feed, "entry")
        .map(|entry| {
            let mut properties = ValueMap::new();
            for (name, value) in ga_children(entry, "property").filter_map(name_value) {
                properties.insert(name, value);
            }
            properties.insert("title", atom_child(entry, "title").map(text).unwrap_or_default());
            properties.insert(
                "updated",
                atom_child(entry, "updated").map(text).unwrap_or_default(),
            );
            AccountEntry::new(properties)
        })
        .collect();

    tracing::debug!("mapped account feed with {} entries", entries.len());

    Ok(AccountFeed {
        root: FeedRootMetadata::new(fields),
        entries,
    })
}

/// Map a report (data) feed document.
pub fn map_report_feed(xml: &str) -> Result<ReportFeed, FeedError> {
    let doc = parse(xml)?;
    let feed = doc.root_element();

    let mut fields = common_root_fields(feed);
    if let Some(source) = ga_child(feed, "dataSource") {
        for (name, value) in ga_children(source, "property").filter_map(name_value) {
            fields.insert(name, value);
        }
        for key in ["tableId", "tableName"] {
            if let Some(node) = ga_child(source, key) {
                fields.insert(key, text(node));
            }
        }
    }
    fields.insert("startDate", ga_text(feed, "startDate").unwrap_or_default());
    fields.insert("endDate", ga_text(feed, "endDate").unwrap_or_default());

    let mut aggregates = AggregateMetrics::new();
    if let Some(node) = ga_child(feed, "aggregates") {
        for (name, value) in ga_children(node, "metric").filter_map(name_value) {
            aggregates.insert(name, classify_metric(value));
        }
    }

    let entries: Vec<ReportEntry> = atom_children(feed, "entry")
        .map(|entry| {
            let metrics: ValueMap = ga_children(entry, "metric")
                .filter_map(name_value)
                .map(|(name, value)| (name, classify_metric(value)))
                .collect();
            let dimensions: ValueMap = ga_children(entry, "dimension")
                .filter_map(name_value)
                .collect();
            ReportEntry::new(metrics, dimensions)
        })
        .collect();

    tracing::debug!(
        "mapped report feed with {} entries and {} aggregate metrics",
        entries.len(),
        aggregates.len()
    );

    Ok(ReportFeed {
        root: FeedRootMetadata::new(fields),
        aggregates,
        entries,
    })
}
