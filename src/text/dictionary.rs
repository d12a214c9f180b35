//! Tag dictionaries for constrained POS tagging
//!
//! Both the general dictionary (token -> permissible tags) and the inverted
//! deterministic symbols dictionary (label -> the only tokens allowed to carry
//! it) share one line-oriented format:
//!
//! ```text
//! # comment
//! casa NOUN
//! $PUNCT , . ! ? ;
//! ```

use crate::{Error, Result};
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;
use std::io::BufRead;
use std::path::Path;
use std::sync::Arc;

lazy_static! {
    static ref WHITESPACE_REGEX: Regex = Regex::new(r"\s+").unwrap();
}

/// Lookup capability consumed by the sequence validator.
///
/// `None` means the key is unconstrained, not forbidden.
pub trait TagDictionary {
    fn tags(&self, key: &str) -> Option<&[String]>;
}

impl<D: TagDictionary + ?Sized> TagDictionary for &D {
    fn tags(&self, key: &str) -> Option<&[String]> {
        (**self).tags(key)
    }
}

impl<D: TagDictionary + ?Sized> TagDictionary for Arc<D> {
    fn tags(&self, key: &str) -> Option<&[String]> {
        (**self).tags(key)
    }
}

impl TagDictionary for HashMap<String, Vec<String>> {
    fn tags(&self, key: &str) -> Option<&[String]> {
        self.get(key).map(Vec::as_slice)
    }
}

/// Immutable in-memory tag dictionary
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimpleTagDictionary {
    entries: HashMap<String, Vec<String>>,
}

impl SimpleTagDictionary {
    /// Build from `(key, values)` pairs, merging repeated keys
    pub fn from_entries<K, V, I>(entries: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, Vec<V>)>,
    {
        let mut dict = Self::default();
        for (key, values) in entries {
            dict.insert(key.into(), values.into_iter().map(Into::into));
        }
        dict
    }

    /// Parse the tabular dictionary format
    pub fn parse(text: &str) -> Result<Self> {
        let mut dict = Self::default();
        for (n, line) in text.lines().enumerate() {
            dict.parse_line(n + 1, line)?;
        }
        Ok(dict)
    }

    /// Read the tabular dictionary format from a buffered reader
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut dict = Self::default();
        for (n, line) in reader.lines().enumerate() {
            dict.parse_line(n + 1, &line?)?;
        }
        Ok(dict)
    }

    /// Load a dictionary file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound(path.display().to_string()));
        }

        log::info!("Loading tag dictionary from: {}", path.display());
        let file = std::fs::File::open(path)?;
        let dict = Self::from_reader(std::io::BufReader::new(file))
            .map_err(|e| Error::Dictionary(format!("{}: {}", path.display(), e)))?;
        log::debug!("Loaded {} dictionary entries", dict.len());
        Ok(dict)
    }

    fn parse_line(&mut self, line_no: usize, line: &str) -> Result<()> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(());
        }

        let mut fields = WHITESPACE_REGEX.split(line);
        let key = match fields.next() {
            Some(key) => key.to_string(),
            None => return Ok(()),
        };
        let values: Vec<&str> = fields.collect();
        if values.is_empty() {
            return Err(Error::InvalidFormat(format!(
                "line {}: entry '{}' has no values",
                line_no, key
            )));
        }

        self.insert(key, values.into_iter().map(str::to_string));
        Ok(())
    }

    fn insert<I: Iterator<Item = String>>(&mut self, key: String, values: I) {
        let slot = self.entries.entry(key).or_default();
        for value in values {
            if !slot.contains(&value) {
                slot.push(value);
            }
        }
    }

    /// Number of keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over dictionary keys (unordered)
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl TagDictionary for SimpleTagDictionary {
    fn tags(&self, key: &str) -> Option<&[String]> {
        self.entries.get(key).map(Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_deterministic_row() {
        let dict = SimpleTagDictionary::parse("$PUNCT , . ! ? ;\n").unwrap();
        assert_eq!(dict.len(), 1);
        assert_eq!(dict.tags("$PUNCT").unwrap(), &[",", ".", "!", "?", ";"]);
        assert!(dict.tags("NOUN").is_none());
    }

    #[test]
    fn test_parse_skips_comments_and_blank_lines() {
        let text = "# general dictionary\n\ncasa\tNOUN\n  la DET PRON  \n";
        let dict = SimpleTagDictionary::parse(text).unwrap();
        assert_eq!(dict.len(), 2);
        assert_eq!(dict.tags("la").unwrap(), &["DET", "PRON"]);
    }

    #[test]
    fn test_repeated_keys_merge() {
        let dict = SimpleTagDictionary::parse("la DET\nla PRON DET\n").unwrap();
        assert_eq!(dict.tags("la").unwrap(), &["DET", "PRON"]);
    }

    #[test]
    fn test_key_without_values_is_rejected() {
        match SimpleTagDictionary::parse("casa NOUN\norphan\n") {
            Err(Error::InvalidFormat(msg)) => assert!(msg.contains("line 2")),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_from_reader_matches_parse() {
        let text = "casa NOUN\n$PUNCT . ,\n";
        let from_reader = SimpleTagDictionary::from_reader(text.as_bytes()).unwrap();
        assert_eq!(from_reader, SimpleTagDictionary::parse(text).unwrap());
    }

    #[test]
    fn test_lookup_through_references() {
        let dict = Arc::new(SimpleTagDictionary::from_entries(vec![("casa", vec!["NOUN"])]));
        let by_ref: &dyn TagDictionary = &dict;
        assert_eq!(by_ref.tags("casa").unwrap(), &["NOUN"]);

        let mut map: HashMap<String, Vec<String>> = HashMap::new();
        map.insert("casa".into(), vec!["NOUN".into()]);
        assert_eq!(map.tags("casa").unwrap(), &["NOUN"]);
    }
}
