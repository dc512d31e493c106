//! Party repository: customers, suppliers, and their transaction logs.
//!
//! The ledger is append-only except through `upsert_entry`, which edits in
//! place keyed on (party, kind, reference) so re-saving a source document
//! never double-posts. Every write ends by refreshing the party's cached
//! balance from the full log.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;

use stockbook_core::party::{
    AgingRow, AgingSummary, PartyEntryKind, PartyLedgerError, PartyLedgerService, StatementLine,
    StatementTotals, aging,
};
use stockbook_shared::types::{LedgerEntryId, PartyId};

use crate::entities::{Party, PartyKind, PartyLedgerEntry};
use crate::store::RecordStore;

/// Fixed reference for the one opening-balance entry per party.
pub const OPENING_BALANCE_REFERENCE: &str = "OPENING-BALANCE";

/// Error types for party operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PartyError {
    /// Party not found.
    #[error("Party not found: {0}")]
    PartyNotFound(PartyId),

    /// Party name must be non-empty.
    #[error("Party name must not be empty")]
    EmptyName,

    /// Ledger validation failure.
    #[error(transparent)]
    Ledger(#[from] PartyLedgerError),
}

/// Input for posting or upserting one ledger entry.
#[derive(Debug, Clone)]
pub struct NewPartyEntry {
    /// Transaction type.
    pub kind: PartyEntryKind,
    /// Amount (positive except for adjustments).
    pub amount: Decimal,
    /// Transaction date.
    pub transaction_date: NaiveDate,
    /// Reference; required for upserts, optional for plain posts.
    pub reference: Option<String>,
    /// Description shown on statements.
    pub description: String,
}

/// Party repository.
pub struct PartyRepository;

impl PartyRepository {
    /// Creates a customer.
    pub fn create_customer(
        store: &mut RecordStore,
        name: &str,
        phone: &str,
        address: &str,
    ) -> Result<PartyId, PartyError> {
        Self::create_party(store, PartyKind::Customer, name, phone, address)
    }

    /// Creates a supplier.
    pub fn create_supplier(
        store: &mut RecordStore,
        name: &str,
        phone: &str,
        address: &str,
    ) -> Result<PartyId, PartyError> {
        Self::create_party(store, PartyKind::Supplier, name, phone, address)
    }

    fn create_party(
        store: &mut RecordStore,
        kind: PartyKind,
        name: &str,
        phone: &str,
        address: &str,
    ) -> Result<PartyId, PartyError> {
        if name.trim().is_empty() {
            return Err(PartyError::EmptyName);
        }
        let id = PartyId::new();
        store.parties.insert(
            id,
            Party {
                id,
                kind,
                name: name.to_owned(),
                phone: phone.to_owned(),
                address: address.to_owned(),
                is_active: true,
                current_balance: Decimal::ZERO,
                created_at: Utc::now(),
            },
        );
        Ok(id)
    }

    /// Appends one ledger entry and refreshes the cached balance.
    pub fn post_entry(
        store: &mut RecordStore,
        party: PartyId,
        entry: NewPartyEntry,
    ) -> Result<LedgerEntryId, PartyError> {
        if !store.parties.contains_key(&party) {
            return Err(PartyError::PartyNotFound(party));
        }
        PartyLedgerService::validate_amount(entry.kind, entry.amount)?;

        let id = LedgerEntryId::new();
        let seq = store.next_seq();
        store.party_entries.push(PartyLedgerEntry {
            id,
            party,
            kind: entry.kind,
            amount: entry.amount,
            transaction_date: entry.transaction_date,
            reference: entry.reference,
            description: entry.description,
            seq,
            created_at: Utc::now(),
        });
        Self::refresh_balance(store, party)?;
        Ok(id)
    }

    /// Inserts or updates the entry keyed on (party, kind, reference).
    ///
    /// An existing entry keeps its identity and sequence; amount, date, and
    /// description are overwritten. This is how order edits re-post without
    /// duplicating.
    pub fn upsert_entry(
        store: &mut RecordStore,
        party: PartyId,
        entry: NewPartyEntry,
    ) -> Result<LedgerEntryId, PartyError> {
        if !store.parties.contains_key(&party) {
            return Err(PartyError::PartyNotFound(party));
        }
        let reference = entry
            .reference
            .as_deref()
            .filter(|r| !r.trim().is_empty())
            .ok_or(PartyLedgerError::MissingReference)?
            .to_owned();
        PartyLedgerService::validate_amount(entry.kind, entry.amount)?;

        let existing = store.party_entries.iter_mut().find(|e| {
            e.party == party && e.kind == entry.kind && e.reference.as_deref() == Some(&reference)
        });
        let id = if let Some(existing) = existing {
            existing.amount = entry.amount;
            existing.transaction_date = entry.transaction_date;
            existing.description = entry.description;
            existing.id
        } else {
            let id = LedgerEntryId::new();
            let seq = store.next_seq();
            store.party_entries.push(PartyLedgerEntry {
                id,
                party,
                kind: entry.kind,
                amount: entry.amount,
                transaction_date: entry.transaction_date,
                reference: Some(reference),
                description: entry.description,
                seq,
                created_at: Utc::now(),
            });
            id
        };
        Self::refresh_balance(store, party)?;
        Ok(id)
    }

    /// Sets the party's opening balance. Idempotent: one fixed-reference
    /// entry per party, updated in place on re-set.
    pub fn set_opening_balance(
        store: &mut RecordStore,
        party: PartyId,
        amount: Decimal,
        as_of: NaiveDate,
    ) -> Result<LedgerEntryId, PartyError> {
        Self::upsert_entry(
            store,
            party,
            NewPartyEntry {
                kind: PartyEntryKind::OpeningBalance,
                amount,
                transaction_date: as_of,
                reference: Some(OPENING_BALANCE_REFERENCE.to_owned()),
                description: "Opening balance".to_owned(),
            },
        )
    }

    /// Derived current balance, straight from the entry log.
    pub fn current_balance(store: &RecordStore, party: PartyId) -> Result<Decimal, PartyError> {
        if !store.parties.contains_key(&party) {
            return Err(PartyError::PartyNotFound(party));
        }
        Ok(PartyLedgerService::current_balance(
            &store.party_entry_views(party),
        ))
    }

    /// Statement-style view of the party's ledger with running balances and
    /// footer totals.
    pub fn statement(
        store: &RecordStore,
        party: PartyId,
    ) -> Result<(Vec<StatementLine>, StatementTotals), PartyError> {
        if !store.parties.contains_key(&party) {
            return Err(PartyError::PartyNotFound(party));
        }
        let lines = PartyLedgerService::statement(&store.party_entry_views(party));
        let totals = PartyLedgerService::statement_totals(&lines);
        Ok((lines, totals))
    }

    /// Receivables aging over customers with a positive derived balance.
    /// Days outstanding count from each customer's latest ledger activity.
    #[must_use]
    pub fn receivables_aging(
        store: &RecordStore,
        as_of: NaiveDate,
    ) -> (Vec<AgingRow>, AgingSummary) {
        let balances: Vec<(PartyId, Decimal, Option<NaiveDate>)> = store
            .parties
            .values()
            .filter(|party| party.kind == PartyKind::Customer)
            .map(|party| {
                let entries = store.party_entry_views(party.id);
                let balance = PartyLedgerService::current_balance(&entries);
                let last_activity = entries.iter().map(|e| e.transaction_date).max();
                (party.id, balance, last_activity)
            })
            .collect();

        let rows = aging::aging_rows(&balances, as_of);
        let summary = aging::summarize(&rows);
        (rows, summary)
    }

    /// Recomputes and stores the cached display balance.
    pub(crate) fn refresh_balance(
        store: &mut RecordStore,
        party: PartyId,
    ) -> Result<Decimal, PartyError> {
        let balance = PartyLedgerService::current_balance(&store.party_entry_views(party));
        let record = store
            .parties
            .get_mut(&party)
            .ok_or(PartyError::PartyNotFound(party))?;
        record.current_balance = balance;
        Ok(balance)
    }
}
