//! Input validation for asset transfers.
//!
//! Every check here runs before any hashing or signing, so an invalid
//! request never produces a partially built or signed transaction.

use stels_crypto::AddressFormat;
use stels_types::{DecimalAmount, DomainValue, TokenGenesisDocument, WalletAddress};

use crate::error::TransactionError;

/// Inputs after validation, in the types the builder consumes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidatedTransfer {
    pub to: WalletAddress,
    pub amount: DecimalAmount,
    pub fee: DecimalAmount,
    pub sign_domain: Vec<String>,
}

/// Validate a transfer request: recipient, then amount, then fee, then the
/// genesis signing domain. The first failure is returned.
pub fn validate_transfer(
    to: &str,
    amount: &str,
    fee: &str,
    genesis: &TokenGenesisDocument,
    address_format: AddressFormat,
) -> Result<ValidatedTransfer, TransactionError> {
    let to = validate_recipient(to, address_format)?;
    let amount = parse_amount(amount)?;
    let fee = parse_fee(fee)?;
    let sign_domain = resolve_sign_domain(genesis)?;
    Ok(ValidatedTransfer {
        to,
        amount,
        fee,
        sign_domain,
    })
}

pub fn validate_recipient(
    to: &str,
    address_format: AddressFormat,
) -> Result<WalletAddress, TransactionError> {
    if address_format.validate(to) {
        Ok(WalletAddress::new(to))
    } else {
        Err(TransactionError::InvalidRecipient(to.to_string()))
    }
}

pub fn parse_amount(amount: &str) -> Result<DecimalAmount, TransactionError> {
    DecimalAmount::parse(amount).map_err(|_| TransactionError::InvalidAmountFormat(amount.into()))
}

pub fn parse_fee(fee: &str) -> Result<DecimalAmount, TransactionError> {
    DecimalAmount::parse(fee).map_err(|_| TransactionError::InvalidFeeFormat(fee.into()))
}

/// Resolve `protocol.sign_domains.token` into the ordered string domain.
pub fn resolve_sign_domain(
    genesis: &TokenGenesisDocument,
) -> Result<Vec<String>, TransactionError> {
    let raw = genesis.token_sign_domain().ok_or_else(|| {
        TransactionError::InvalidSignDomain("protocol.sign_domains.token is missing".into())
    })?;
    if raw.is_empty() {
        return Err(TransactionError::InvalidSignDomain(
            "protocol.sign_domains.token is empty".into(),
        ));
    }
    raw.iter()
        .enumerate()
        .map(|(i, value)| {
            DomainValue::from_json(value)
                .map(|d| d.to_domain_string())
                .ok_or_else(|| {
                    TransactionError::InvalidSignDomain(format!(
                        "element {i} is not a string or number: {value}"
                    ))
                })
        })
        .collect()
}
