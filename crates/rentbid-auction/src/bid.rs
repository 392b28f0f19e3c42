//! Bids and the ordered bid book.

use std::collections::HashMap;
use std::fmt;

use rentbid_store::{composite_key, InvocationId, StoreResult};
use rentbid_types::{AuctionKey, ParticipantId};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Object type under which bid keys are derived.
pub const BID_OBJECT_TYPE: &str = "bid";

/// Derive the key of the bid placed on `auction` by invocation `invocation`.
///
/// Pure and deterministic. Two invocations never share an id, so two
/// admitted bids never share a key, even when the same renter bids twice.
pub fn bid_key(auction: &AuctionKey, invocation: &InvocationId) -> StoreResult<String> {
    composite_key(BID_OBJECT_TYPE, &[auction.as_str(), invocation.as_str()])
}

/// A revealed bid. Immutable once recorded.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bid {
    #[serde(rename = "bidder_id")]
    pub bidder: ParticipantId,
    pub price: u64,
    /// Wallet the bidder pays from.
    #[serde(rename = "renter_wallet")]
    pub wallet: String,
}

/// Bids of one auction, in admission order.
///
/// Settlement breaks ties in favour of the earlier bid, so the order of
/// entries is part of the auction's state. On the ledger the book is a JSON
/// object keyed by bid key; it is written in admission order and read back in
/// document order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BidBook {
    entries: Vec<(String, Bid)>,
    index: HashMap<String, usize>,
}

/// Returned when a bid key is already present in the book.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DuplicateBidKey(pub String);

impl BidBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a bid. Keys are unique within a book.
    pub fn insert(&mut self, key: String, bid: Bid) -> Result<(), DuplicateBidKey> {
        if self.index.contains_key(&key) {
            return Err(DuplicateBidKey(key));
        }
        self.index.insert(key.clone(), self.entries.len());
        self.entries.push((key, bid));
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&Bid> {
        self.index.get(key).map(|&i| &self.entries[i].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(bid key, bid)` pairs in admission order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Bid)> {
        self.entries.iter().map(|(k, b)| (k.as_str(), b))
    }
}

impl Serialize for BidBook {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, bid) in &self.entries {
            map.serialize_entry(key, bid)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for BidBook {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct BidBookVisitor;

        impl<'de> Visitor<'de> for BidBookVisitor {
            type Value = BidBook;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of bid keys to bids")
            }

            fn visit_unit<E: serde::de::Error>(self) -> Result<Self::Value, E> {
                Ok(BidBook::new())
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut book = BidBook::new();
                while let Some((key, bid)) = access.next_entry::<String, Bid>()? {
                    book.insert(key, bid).map_err(|DuplicateBidKey(key)| {
                        serde::de::Error::custom(format!("duplicate bid key {key:?}"))
                    })?;
                }
                Ok(book)
            }
        }

        deserializer.deserialize_any(BidBookVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bid(bidder: &str, price: u64) -> Bid {
        Bid {
            bidder: ParticipantId::new(bidder).unwrap(),
            price,
            wallet: format!("wallet-{bidder}"),
        }
    }

    #[test]
    fn bid_key_is_pure() {
        let auction = AuctionKey::new("a1").unwrap();
        let tx = InvocationId::from_raw("tx-9");
        assert_eq!(bid_key(&auction, &tx).unwrap(), bid_key(&auction, &tx).unwrap());
        assert_eq!(bid_key(&auction, &tx).unwrap(), "\u{0}bid\u{0}a1\u{0}tx-9\u{0}");
    }

    #[test]
    fn same_bidder_different_invocations_get_distinct_keys() {
        let auction = AuctionKey::new("a1").unwrap();
        let k1 = bid_key(&auction, &InvocationId::from_raw("tx-1")).unwrap();
        let k2 = bid_key(&auction, &InvocationId::from_raw("tx-2")).unwrap();
        assert_ne!(k1, k2);
    }

    #[test]
    fn book_keeps_admission_order() {
        let mut book = BidBook::new();
        book.insert("z".into(), bid("r1", 10)).unwrap();
        book.insert("a".into(), bid("r2", 20)).unwrap();
        book.insert("m".into(), bid("r3", 30)).unwrap();
        let keys: Vec<&str> = book.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
        assert_eq!(book.get("a").unwrap().price, 20);
    }

    #[test]
    fn book_rejects_duplicate_keys() {
        let mut book = BidBook::new();
        book.insert("k".into(), bid("r1", 10)).unwrap();
        assert_eq!(
            book.insert("k".into(), bid("r2", 20)),
            Err(DuplicateBidKey("k".into()))
        );
        assert_eq!(book.len(), 1);
    }

    #[test]
    fn serialized_book_preserves_order() {
        let mut book = BidBook::new();
        book.insert("zz".into(), bid("r1", 10)).unwrap();
        book.insert("aa".into(), bid("r2", 20)).unwrap();
        let json = serde_json::to_string(&book).unwrap();
        assert!(json.find("zz").unwrap() < json.find("aa").unwrap());
        assert!(json.contains("\"bidder_id\":\"r1\""));
        assert!(json.contains("\"renter_wallet\":\"wallet-r1\""));

        let parsed: BidBook = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, book);
    }

    #[test]
    fn duplicate_keys_in_document_are_rejected() {
        let json = r#"{"k":{"bidder_id":"r1","price":1,"renter_wallet":"w"},
                       "k":{"bidder_id":"r2","price":2,"renter_wallet":"w"}}"#;
        assert!(serde_json::from_str::<BidBook>(json).is_err());
    }

    #[test]
    fn null_book_reads_as_empty() {
        let parsed: BidBook = serde_json::from_str("null").unwrap();
        assert!(parsed.is_empty());
    }
}
