//! The block aggregate.

use serde::{Deserialize, Serialize};

use crate::header::Header;
use crate::tx::Transaction;

/// An immutable block: a header plus its ordered transactions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    header: Header,
    transactions: Vec<Transaction>,
}

impl Block {
    pub fn new(header: Header, transactions: Vec<Transaction>) -> Self {
        Self {
            header,
            transactions,
        }
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }
}
