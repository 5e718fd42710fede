//! Invocation parsing: resolves the host's function name and named
//! arguments into a typed [`Invocation`] once, at the boundary.

use std::collections::BTreeMap;

use aerial_types::AccountAddress;

use crate::ContractError;

/// A parsed contract call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Invocation {
    /// Move `amount` from `source` to `destination`.
    MakePayment {
        source: AccountAddress,
        destination: AccountAddress,
        amount: u128,
    },
    /// Remove an account's balance and stake history.
    DeleteAccount { account: AccountAddress },
    /// Return an account's balance as decimal ASCII.
    CheckBalance { account: AccountAddress },
    /// Mint the proof-of-stake reward owed to an account.
    MintPoS { account: AccountAddress },
}

impl Invocation {
    pub const MAKE_PAYMENT: &'static str = "MakePayment";
    pub const DELETE_ACCOUNT: &'static str = "DeleteAccount";
    pub const CHECK_BALANCE: &'static str = "CheckBalance";
    pub const MINT_POS: &'static str = "MintPoS";

    /// Parse a call by function name.
    ///
    /// Argument names: `partySrc`, `partyDst`, `amount` for payments and
    /// `partyID` for everything else.
    pub fn parse(function: &str, args: &BTreeMap<String, String>) -> Result<Self, ContractError> {
        match function {
            Self::MAKE_PAYMENT => Ok(Invocation::MakePayment {
                source: address_arg(args, "partySrc")?,
                destination: address_arg(args, "partyDst")?,
                amount: amount_arg(args, "amount")?,
            }),
            Self::DELETE_ACCOUNT => Ok(Invocation::DeleteAccount {
                account: address_arg(args, "partyID")?,
            }),
            Self::CHECK_BALANCE => Ok(Invocation::CheckBalance {
                account: address_arg(args, "partyID")?,
            }),
            Self::MINT_POS => Ok(Invocation::MintPoS {
                account: address_arg(args, "partyID")?,
            }),
            other => Err(ContractError::InvalidArguments(format!(
                "unknown function {:?}",
                other
            ))),
        }
    }

    pub fn function_name(&self) -> &'static str {
        match self {
            Invocation::MakePayment { .. } => Self::MAKE_PAYMENT,
            Invocation::DeleteAccount { .. } => Self::DELETE_ACCOUNT,
            Invocation::CheckBalance { .. } => Self::CHECK_BALANCE,
            Invocation::MintPoS { .. } => Self::MINT_POS,
        }
    }

    /// Whether the call only reads the ledger.
    pub fn is_query(&self) -> bool {
        matches!(self, Invocation::CheckBalance { .. })
    }
}

fn arg<'a>(args: &'a BTreeMap<String, String>, name: &str) -> Result<&'a str, ContractError> {
    args.get(name)
        .map(|v| v.trim())
        .ok_or_else(|| ContractError::InvalidArguments(format!("missing argument {}", name)))
}

fn address_arg(args: &BTreeMap<String, String>, name: &str) -> Result<AccountAddress, ContractError> {
    let raw = arg(args, name)?;
    AccountAddress::parse(raw)
        .ok_or_else(|| ContractError::InvalidArguments(format!("{} is not a valid address: {:?}", name, raw)))
}

fn amount_arg(args: &BTreeMap<String, String>, name: &str) -> Result<u128, ContractError> {
    let raw = arg(args, name)?;
    raw.parse()
        .map_err(|_| ContractError::InvalidArguments(format!("{} is not a valid amount: {:?}", name, raw)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn parses_make_payment() {
        let inv = Invocation::parse(
            "MakePayment",
            &args(&[("partySrc", "alice"), ("partyDst", "bob"), ("amount", "25")]),
        )
        .unwrap();
        assert_eq!(
            inv,
            Invocation::MakePayment {
                source: AccountAddress::parse("alice").unwrap(),
                destination: AccountAddress::parse("bob").unwrap(),
                amount: 25,
            }
        );
        assert_eq!(inv.function_name(), "MakePayment");
        assert!(!inv.is_query());
    }

    #[test]
    fn parses_single_party_calls() {
        let a = args(&[("partyID", "carol")]);
        let carol = AccountAddress::parse("carol").unwrap();
        assert_eq!(
            Invocation::parse("CheckBalance", &a).unwrap(),
            Invocation::CheckBalance { account: carol.clone() }
        );
        assert_eq!(
            Invocation::parse("DeleteAccount", &a).unwrap(),
            Invocation::DeleteAccount { account: carol.clone() }
        );
        assert_eq!(
            Invocation::parse("MintPoS", &a).unwrap(),
            Invocation::MintPoS { account: carol }
        );
    }

    #[test]
    fn unknown_function_is_invalid() {
        let result = Invocation::parse("Launder", &args(&[("partyID", "carol")]));
        assert!(matches!(result, Err(ContractError::InvalidArguments(_))));
    }

    #[test]
    fn missing_argument_is_invalid() {
        let result = Invocation::parse("MakePayment", &args(&[("partySrc", "alice"), ("amount", "1")]));
        assert!(matches!(result, Err(ContractError::InvalidArguments(_))));
    }

    #[test]
    fn negative_amount_is_invalid() {
        let result = Invocation::parse(
            "MakePayment",
            &args(&[("partySrc", "alice"), ("partyDst", "bob"), ("amount", "-5")]),
        );
        assert!(matches!(result, Err(ContractError::InvalidArguments(_))));
    }

    #[test]
    fn arguments_are_trimmed_alike() {
        let inv = Invocation::parse(
            "MakePayment",
            &args(&[("partySrc", " alice"), ("partyDst", "bob\n"), ("amount", " 25 ")]),
        )
        .unwrap();
        assert_eq!(
            inv,
            Invocation::MakePayment {
                source: AccountAddress::parse("alice").unwrap(),
                destination: AccountAddress::parse("bob").unwrap(),
                amount: 25,
            }
        );
        let blank = Invocation::parse("MintPoS", &args(&[("partyID", "   ")]));
        assert!(matches!(blank, Err(ContractError::InvalidArguments(_))));
    }

    #[test]
    fn reserved_address_is_invalid() {
        let result = Invocation::parse("CheckBalance", &args(&[("partyID", "__totalSupply")]));
        assert!(matches!(result, Err(ContractError::InvalidArguments(_))));
    }
}
