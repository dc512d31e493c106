//! Bank repository: company accounts and their ledgers.
//!
//! Withdrawals are not blocked by the derived balance; overdrafts happen in
//! the real world and the ledger records what the bank says, not what we
//! would prefer.

use std::ops::RangeInclusive;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;

use stockbook_core::bank::{BankEntryKind, BankLedgerService, LedgerRow};
use stockbook_shared::types::{BankAccountId, BankEntryId};

use crate::entities::{BankAccount, BankLedgerEntry};
use crate::store::RecordStore;

/// Error types for bank operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum BankError {
    /// Account not found.
    #[error("Bank account not found: {0}")]
    AccountNotFound(BankAccountId),

    /// Entry amounts must be positive.
    #[error("Amount must be positive, got {0}")]
    NonPositiveAmount(Decimal),
}

/// Input for creating a bank account.
#[derive(Debug, Clone)]
pub struct NewBankAccount {
    /// Display name.
    pub name: String,
    /// Account number at the bank.
    pub account_number: String,
    /// Balance carried over from before the entry log began.
    pub opening_balance: Decimal,
}

/// Bank repository.
pub struct BankRepository;

impl BankRepository {
    /// Creates a bank account. The cached balance starts at the opening
    /// balance.
    pub fn create_account(store: &mut RecordStore, input: NewBankAccount) -> BankAccountId {
        let id = BankAccountId::new();
        store.bank_accounts.insert(
            id,
            BankAccount {
                id,
                name: input.name,
                account_number: input.account_number,
                opening_balance: input.opening_balance,
                current_balance: input.opening_balance,
                is_active: true,
                created_at: Utc::now(),
            },
        );
        id
    }

    /// Appends one ledger entry and refreshes the cached balance.
    pub fn post_entry(
        store: &mut RecordStore,
        account: BankAccountId,
        kind: BankEntryKind,
        amount: Decimal,
        transaction_date: NaiveDate,
        description: String,
    ) -> Result<BankEntryId, BankError> {
        if amount <= Decimal::ZERO {
            return Err(BankError::NonPositiveAmount(amount));
        }
        if !store.bank_accounts.contains_key(&account) {
            return Err(BankError::AccountNotFound(account));
        }
        let id = BankEntryId::new();
        let seq = store.next_seq();
        store.bank_entries.push(BankLedgerEntry {
            id,
            account,
            kind,
            amount,
            transaction_date,
            description,
            seq,
            created_at: Utc::now(),
        });
        Self::refresh_balance(store, account)?;
        Ok(id)
    }

    /// Derived current balance, optionally restricted to a date range for
    /// period reports.
    pub fn current_balance(
        store: &RecordStore,
        account: BankAccountId,
        range: Option<&RangeInclusive<NaiveDate>>,
    ) -> Result<Decimal, BankError> {
        let record = store
            .bank_account(account)
            .ok_or(BankError::AccountNotFound(account))?;
        Ok(BankLedgerService::current_balance(
            record.opening_balance,
            &store.bank_entry_views(account),
            range,
        ))
    }

    /// Statement-style ledger with a running balance after each entry, in
    /// (date, insertion) order starting from the opening balance. The
    /// optional range restricts which rows are shown; balances are still
    /// replayed over the full log so a period view never restates history.
    pub fn ledger_rows(
        store: &RecordStore,
        account: BankAccountId,
        range: Option<&RangeInclusive<NaiveDate>>,
    ) -> Result<Vec<LedgerRow>, BankError> {
        let record = store
            .bank_account(account)
            .ok_or(BankError::AccountNotFound(account))?;
        Ok(BankLedgerService::running_balance(
            record.opening_balance,
            &store.bank_entry_views(account),
        )
        .filter(|row| range.is_none_or(|r| r.contains(&row.entry.transaction_date)))
        .collect())
    }

    fn refresh_balance(store: &mut RecordStore, account: BankAccountId) -> Result<(), BankError> {
        let balance = Self::current_balance(store, account, None)?;
        let record = store
            .bank_accounts
            .get_mut(&account)
            .ok_or(BankError::AccountNotFound(account))?;
        record.current_balance = balance;
        Ok(())
    }
}
