//! The domain the build script renders accessors for.
//!
//! Compiled twice: once by the build script to describe the schema, once by
//! the library as the types the rendered accessors focus on.

use std::collections::{BTreeMap, HashMap};

use optica::Schema;
use optica::schema::{Describe, TypeRef};

/// A scalar without a `Default` impl.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Card,
    Wrap,
}

impl Describe for Kind {
    fn type_ref() -> TypeRef {
        TypeRef::scalar("Kind")
    }
}

/// A scalar whose empty reading is configured in the build script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    Low,
    High,
}

impl Describe for Priority {
    fn type_ref() -> TypeRef {
        TypeRef::scalar("Priority")
    }
}

#[derive(Debug, Clone, PartialEq, Schema)]
pub struct Entity {
    pub id: u64,
    pub nickname: Option<String>,
    pub address: Address,
    pub billing: Option<Address>,
    pub tags: Vec<String>,
    pub contacts: Vec<Contact>,
    pub labels: HashMap<String, i32>,
    pub offices: BTreeMap<String, Address>,
    pub tree: Box<Node>,
    pub gift: Option<Gift>,
}

#[derive(Debug, Clone, PartialEq, Schema)]
pub struct Address {
    pub city: String,
    pub zip: Option<String>,
    pub history: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Schema)]
pub struct Contact {
    pub email: String,
    pub phones: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Schema)]
pub struct Node {
    pub value: String,
    pub kind: Kind,
    pub child: Option<Box<Node>>,
}

#[derive(Debug, Clone, PartialEq, Schema)]
pub struct Gift {
    pub kind: Kind,
    pub priority: Priority,
    pub note: Option<String>,
}
