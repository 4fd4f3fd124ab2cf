//! Node capability string codec
//!
//! Capabilities are stored on the node as a single `key:value,key:value`
//! string. Entries that are not exactly two non-empty colon-separated parts
//! are skipped (with a warning) when reading and carried through verbatim
//! when writing, so keys owned by other drivers are never disturbed.

use std::fmt;

use tracing::warn;

use crate::error::Error;
use crate::node::Node;
use crate::task::Task;
use crate::Result;

const ENTRY_SEPARATOR: char = ',';
const KEY_VALUE_SEPARATOR: char = ':';

#[derive(Debug, Clone, PartialEq, Eq)]
enum Entry {
    Pair { key: String, value: String },
    Malformed(String),
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entry::Pair { key, value } => write!(f, "{}{}{}", key, KEY_VALUE_SEPARATOR, value),
            Entry::Malformed(raw) => f.write_str(raw),
        }
    }
}

/// Decoded capability set, in the order the entries were written
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Capabilities {
    entries: Vec<Entry>,
}

impl Capabilities {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a capability string. Never fails.
    pub fn parse(raw: &str) -> Self {
        if raw.is_empty() {
            return Self::default();
        }

        let entries = raw
            .split(ENTRY_SEPARATOR)
            .map(|item| {
                let parts: Vec<&str> = item.split(KEY_VALUE_SEPARATOR).collect();
                match parts.as_slice() {
                    [key, value] if !key.is_empty() && !value.is_empty() => Entry::Pair {
                        key: key.to_string(),
                        value: value.to_string(),
                    },
                    _ => {
                        warn!(
                            capability = %item,
                            "Ignoring malformed capability. Format should be 'key:val'"
                        );
                        Entry::Malformed(item.to_string())
                    }
                }
            })
            .collect();

        Self { entries }
    }

    /// Value of the first well-formed entry for `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.iter().find_map(|entry| match entry {
            Entry::Pair { key: k, value } if k == key => Some(value.as_str()),
            _ => None,
        })
    }

    /// Insert or update `key`.
    ///
    /// An existing entry is updated in place; a new key goes to the front.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        validate_token("key", key)?;
        validate_token("value", value)?;

        let existing = self.entries.iter_mut().find_map(|entry| match entry {
            Entry::Pair { key: k, value } if k == key => Some(value),
            _ => None,
        });

        match existing {
            Some(current) => *current = value.to_string(),
            None => self.entries.insert(
                0,
                Entry::Pair {
                    key: key.to_string(),
                    value: value.to_string(),
                },
            ),
        }
        Ok(())
    }

    /// Remove every well-formed entry for `key`. Returns whether anything was removed.
    pub fn remove(&mut self, key: &str) -> bool {
        let before = self.entries.len();
        self.entries
            .retain(|entry| !matches!(entry, Entry::Pair { key: k, .. } if k == key));
        self.entries.len() != before
    }

    /// Well-formed `(key, value)` pairs in order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().filter_map(|entry| match entry {
            Entry::Pair { key, value } => Some((key.as_str(), value.as_str())),
            Entry::Malformed(_) => None,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for Capabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                write!(f, "{}", ENTRY_SEPARATOR)?;
            }
            write!(f, "{}", entry)?;
        }
        Ok(())
    }
}

/// Whether `token` can be stored as a capability key or value
pub fn is_valid_token(token: &str) -> bool {
    !token.is_empty() && !token.contains([ENTRY_SEPARATOR, KEY_VALUE_SEPARATOR])
}

fn validate_token(what: &str, token: &str) -> Result<()> {
    if !is_valid_token(token) {
        return Err(Error::InvalidParameterValue(format!(
            "Invalid capability {} '{}'. It must be non-empty and must not contain ',' or ':'.",
            what, token
        )));
    }
    Ok(())
}

/// Look up `key` in a raw capability string
pub fn get_capability(raw: &str, key: &str) -> Option<String> {
    Capabilities::parse(raw).get(key).map(str::to_string)
}

/// Look up `key` in the node's capabilities
pub fn get_node_capability(node: &Node, key: &str) -> Option<String> {
    node.capabilities().and_then(|raw| get_capability(&raw, key))
}

/// Set `key` in the node's capabilities and save the node.
///
/// A `None` or empty value removes the key. An empty key is ignored. The
/// node is only saved when the encoded string actually changes.
pub async fn set_node_capability(task: &mut Task, key: &str, value: Option<&str>) -> Result<()> {
    if key.is_empty() {
        return Ok(());
    }

    let current = task.node.capabilities().unwrap_or_default();
    let mut capabilities = Capabilities::parse(&current);

    match value.filter(|v| !v.is_empty()) {
        Some(value) => capabilities.set(key, value)?,
        None => {
            if !capabilities.remove(key) {
                return Ok(());
            }
        }
    }

    let updated = capabilities.to_string();
    if updated == current {
        return Ok(());
    }

    task.node.set_capabilities(updated);
    task.save().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryNodeStore, NodeStore};
    use std::sync::Arc;

    async fn task_with(capabilities: Option<&str>) -> (Task, Arc<MemoryNodeStore>) {
        let store = Arc::new(MemoryNodeStore::new());
        let mut node = Node::new("pxe_ilo");
        if let Some(caps) = capabilities {
            node.set_capabilities(caps);
        }
        (Task::new(node, store.clone()), store)
    }

    #[test]
    fn test_get_capability() {
        assert_eq!(
            get_capability("boot_mode:bios,foo:bar", "boot_mode").as_deref(),
            Some("bios")
        );
        assert_eq!(get_capability("boot_mode:bios,foo:bar", "foo").as_deref(), Some("bar"));
        assert_eq!(get_capability("boot_mode:bios", "missing"), None);
        assert_eq!(get_capability("", "boot_mode"), None);
    }

    #[test]
    fn test_get_skips_malformed_entries() {
        let raw = "boot_mode,foo:,:bar,a:b:c,boot_mode:uefi";
        assert_eq!(get_capability(raw, "boot_mode").as_deref(), Some("uefi"));
        assert_eq!(get_capability(raw, "foo"), None);
        assert_eq!(get_capability(raw, "a"), None);
    }

    #[test]
    fn test_first_duplicate_wins() {
        assert_eq!(
            get_capability("boot_mode:bios,boot_mode:uefi", "boot_mode").as_deref(),
            Some("bios")
        );
    }

    #[test]
    fn test_encode_preserves_malformed_entries() {
        let raw = "junk,foo:bar,,x:";
        let caps = Capabilities::parse(raw);
        assert_eq!(caps.to_string(), raw);
        assert_eq!(caps.iter().collect::<Vec<_>>(), vec![("foo", "bar")]);
    }

    #[test]
    fn test_set_rejects_separators() {
        let mut caps = Capabilities::new();
        assert!(matches!(
            caps.set("boot_mode", "a,b"),
            Err(Error::InvalidParameterValue(_))
        ));
        assert!(matches!(
            caps.set("boot:mode", "bios"),
            Err(Error::InvalidParameterValue(_))
        ));
        assert!(caps.is_empty());
    }

    #[test]
    fn test_update_only_touches_whole_entries() {
        // The old value also appears as a substring of another entry.
        let mut caps = Capabilities::parse("boot_mode:bios,note:bios_legacy");
        caps.set("boot_mode", "uefi").unwrap();
        assert_eq!(caps.to_string(), "boot_mode:uefi,note:bios_legacy");
    }

    #[tokio::test]
    async fn test_set_prepends_new_key() {
        let (mut task, store) = task_with(Some("foo:bar")).await;

        set_node_capability(&mut task, "boot_mode", Some("uefi"))
            .await
            .unwrap();

        assert_eq!(
            task.node.capabilities().as_deref(),
            Some("boot_mode:uefi,foo:bar")
        );
        let saved = store.get_node(&task.node.uuid).await.unwrap().unwrap();
        assert_eq!(saved.capabilities().as_deref(), Some("boot_mode:uefi,foo:bar"));
    }

    #[tokio::test]
    async fn test_set_on_empty_capabilities() {
        let (mut task, store) = task_with(None).await;

        set_node_capability(&mut task, "boot_mode", Some("bios"))
            .await
            .unwrap();

        assert_eq!(task.node.capabilities().as_deref(), Some("boot_mode:bios"));
        assert_eq!(store.save_count(), 1);
    }

    #[tokio::test]
    async fn test_set_replaces_in_place() {
        let (mut task, _store) = task_with(Some("foo:bar,boot_mode:bios,baz:qux")).await;

        set_node_capability(&mut task, "boot_mode", Some("uefi"))
            .await
            .unwrap();

        assert_eq!(
            task.node.capabilities().as_deref(),
            Some("foo:bar,boot_mode:uefi,baz:qux")
        );
    }

    #[tokio::test]
    async fn test_set_none_removes_key_cleanly() {
        let (mut task, store) = task_with(Some("boot_mode:bios,foo:bar")).await;

        set_node_capability(&mut task, "boot_mode", None)
            .await
            .unwrap();

        assert_eq!(task.node.capabilities().as_deref(), Some("foo:bar"));
        assert_eq!(store.save_count(), 1);

        let (mut task, _) = task_with(Some("foo:bar,boot_mode:bios")).await;
        set_node_capability(&mut task, "boot_mode", Some(""))
            .await
            .unwrap();
        assert_eq!(task.node.capabilities().as_deref(), Some("foo:bar"));

        let (mut task, _) = task_with(Some("boot_mode:bios")).await;
        set_node_capability(&mut task, "boot_mode", None)
            .await
            .unwrap();
        assert_eq!(task.node.capabilities().as_deref(), Some(""));
    }

    #[tokio::test]
    async fn test_set_none_for_absent_key_is_noop() {
        let (mut task, store) = task_with(Some("foo:bar")).await;

        set_node_capability(&mut task, "boot_mode", None)
            .await
            .unwrap();

        assert_eq!(task.node.capabilities().as_deref(), Some("foo:bar"));
        assert_eq!(store.save_count(), 0);
    }

    #[tokio::test]
    async fn test_set_empty_key_is_noop() {
        let (mut task, store) = task_with(Some("foo:bar")).await;

        set_node_capability(&mut task, "", Some("x")).await.unwrap();

        assert_eq!(task.node.capabilities().as_deref(), Some("foo:bar"));
        assert_eq!(store.save_count(), 0);
    }

    #[tokio::test]
    async fn test_set_same_value_does_not_save() {
        let (mut task, store) = task_with(Some("boot_mode:uefi")).await;

        set_node_capability(&mut task, "boot_mode", Some("uefi"))
            .await
            .unwrap();

        assert_eq!(store.save_count(), 0);
    }

    #[tokio::test]
    async fn test_set_leaves_unrelated_malformed_entries() {
        let (mut task, _store) = task_with(Some("garbage,foo:bar")).await;

        set_node_capability(&mut task, "boot_mode", Some("bios"))
            .await
            .unwrap();

        assert_eq!(
            task.node.capabilities().as_deref(),
            Some("boot_mode:bios,garbage,foo:bar")
        );
    }

    #[tokio::test]
    async fn test_set_then_get_roundtrip() {
        for raw in ["", "foo:bar", "boot_mode:bios,foo:bar", "a:b,c:d,e:f"] {
            let (mut task, _store) = task_with(Some(raw)).await;
            set_node_capability(&mut task, "c", Some("zz")).await.unwrap();
            assert_eq!(get_node_capability(&task.node, "c").as_deref(), Some("zz"));
        }
    }

    mod properties {
        use super::*;
        use proptest::collection::vec;
        use proptest::prelude::*;

        fn entries() -> impl Strategy<Value = Vec<(String, String)>> {
            vec(("[a-z_]{1,8}", "[a-z0-9]{1,8}"), 0..6)
        }

        fn encode(entries: &[(String, String)]) -> String {
            entries
                .iter()
                .map(|(k, v)| format!("{}:{}", k, v))
                .collect::<Vec<_>>()
                .join(",")
        }

        proptest! {
            #[test]
            fn set_then_get_for_any_capabilities(
                entries in entries(),
                key in "[a-z_]{1,8}",
                value in "[a-z0-9]{1,8}"
            ) {
                let mut caps = Capabilities::parse(&encode(&entries));
                prop_assert!(caps.set(&key, &value).is_ok());
                let encoded = caps.to_string();

                prop_assert_eq!(get_capability(&encoded, &key), Some(value.clone()));
                for (k, _) in entries.iter().filter(|(k, _)| *k != key) {
                    let first = entries.iter().find(|(e, _)| e == k).map(|(_, v)| v.clone());
                    prop_assert_eq!(get_capability(&encoded, k), first);
                }
            }

            #[test]
            fn remove_clears_key_for_any_capabilities(entries in entries(), key in "[a-z_]{1,8}") {
                let mut caps = Capabilities::parse(&encode(&entries));
                caps.remove(&key);
                let encoded = caps.to_string();

                prop_assert_eq!(get_capability(&encoded, &key), None);
                prop_assert!(!encoded.starts_with(',') && !encoded.ends_with(','));
                prop_assert!(!encoded.contains(",,"));
            }

            #[test]
            fn well_formed_strings_reencode_unchanged(entries in entries()) {
                let raw = encode(&entries);
                prop_assert_eq!(Capabilities::parse(&raw).to_string(), raw);
            }
        }
    }
}
