//! Ordered wire field collections for gateway messages.

use std::collections::BTreeMap;

use serde::Serialize;

/// An ordered map of wire field names to values.
///
/// Iteration follows byte-wise lexicographic key order, which is the
/// canonical ordering for secure-hash input. Field names never repeat;
/// optional fields are omitted entirely rather than carried with blank
/// values.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldMap(BTreeMap<String, String>);

impl FieldMap {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Insert a required field, replacing any previous value for the name.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    /// Insert a field only when a non-blank value is present.
    pub fn insert_optional(&mut self, name: impl Into<String>, value: Option<&str>) {
        if let Some(value) = value {
            if !value.trim().is_empty() {
                self.0.insert(name.into(), value.to_string());
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.0.remove(name)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Key-ordered iteration over `(name, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Consume the map into key-ordered pairs for form encoding.
    pub fn into_pairs(self) -> Vec<(String, String)> {
        self.0.into_iter().collect()
    }
}

impl FromIterator<(String, String)> for FieldMap {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iteration_is_byte_wise_key_ordered_regardless_of_insertion_order() {
        let mut forward = FieldMap::new();
        forward.insert("Amount", "5000");
        forward.insert("CurrencyISOCode", "682");
        forward.insert("MerchantID", "M1");

        let mut reversed = FieldMap::new();
        reversed.insert("MerchantID", "M1");
        reversed.insert("CurrencyISOCode", "682");
        reversed.insert("Amount", "5000");

        let order: Vec<&str> = forward.iter().map(|(name, _)| name).collect();
        assert_eq!(order, ["Amount", "CurrencyISOCode", "MerchantID"]);
        assert_eq!(forward, reversed);
    }

    #[test]
    fn uppercase_keys_sort_before_lowercase() {
        let mut fields = FieldMap::new();
        fields.insert("amount", "1");
        fields.insert("Zebra", "2");
        let order: Vec<&str> = fields.iter().map(|(name, _)| name).collect();
        assert_eq!(order, ["Zebra", "amount"]);
    }

    #[test]
    fn optional_blank_values_are_omitted() {
        let mut fields = FieldMap::new();
        fields.insert_optional("PaymentDescription", None);
        fields.insert_optional("ItemID", Some("   "));
        fields.insert_optional("Token", Some("tok-1"));
        assert!(!fields.contains_key("PaymentDescription"));
        assert!(!fields.contains_key("ItemID"));
        assert_eq!(fields.get("Token"), Some("tok-1"));
        assert_eq!(fields.len(), 1);
    }

    #[test]
    fn reinserting_a_name_replaces_the_value() {
        let mut fields = FieldMap::new();
        fields.insert("Amount", "100");
        fields.insert("Amount", "200");
        assert_eq!(fields.len(), 1);
        assert_eq!(fields.get("Amount"), Some("200"));
    }
}
