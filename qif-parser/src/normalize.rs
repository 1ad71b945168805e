use qif_core::{Split, Transaction};

/// Gives every transaction at least one split.
///
/// A transaction without splits gets a single split built from its own transfer account,
/// amount, category and memo; the memo moves into the split.  A transaction with splits keeps
/// them, except that an unlabeled first split takes the transaction's transfer account.
pub fn normalize_splits(transactions: Vec<Transaction<'_>>) -> Vec<Transaction<'_>> {
    transactions.into_iter().map(normalize).collect()
}

fn normalize(mut txn: Transaction<'_>) -> Transaction<'_> {
    match txn.splits.first_mut() {
        None => {
            let split = Split {
                location: txn.location,
                account: txn.to_account.clone(),
                amount: txn.amount_t_code.clone(),
                category: txn.category.clone(),
                memo: std::mem::take(&mut txn.memo),
            };
            txn.splits.push(split);
        }
        Some(first) => {
            if first.account.is_empty() {
                first.account = txn.to_account.clone();
            }
        }
    }
    txn
}

#[cfg(test)]
mod tests {
    use super::*;
    use qif_core::Location;

    #[test]
    fn synthesized_split() {
        let txn = Transaction::builder()
            .location(Location::new(2, 1))
            .date("1/ 1'23".into())
            .amount_t_code("100.00".into())
            .to_account("Savings".into())
            .payee("Payroll".into())
            .memo("January".into())
            .build();
        let normalized = normalize_splits(vec![txn.clone()]);
        assert_eq!(1, normalized.len());
        let normalized = &normalized[0];
        assert_eq!(
            vec![Split::builder()
                .location(Location::new(2, 1))
                .account("Savings".into())
                .amount("100.00".into())
                .memo("January".into())
                .build()],
            normalized.splits
        );
        assert_eq!("", normalized.memo);
        assert_eq!(txn.payee, normalized.payee);
        assert_eq!(txn.to_account, normalized.to_account);
    }

    #[test]
    fn first_split_inherits_transfer_account() {
        let splits = vec![
            Split::builder()
                .category("Groceries".into())
                .amount("50.00".into())
                .build(),
            Split::builder()
                .category("Gas".into())
                .amount("20.00".into())
                .build(),
        ];
        let txn = Transaction::builder()
            .to_account("Checking".into())
            .memo("errands".into())
            .splits(splits.clone())
            .build();
        let normalized = normalize_splits(vec![txn]).remove(0);
        assert_eq!("Checking", normalized.splits[0].account);
        assert_eq!("Groceries", normalized.splits[0].category);
        assert_eq!(splits[1], normalized.splits[1]);
        assert_eq!("errands", normalized.memo);
    }

    #[test]
    fn labeled_first_split_is_kept() {
        let split = Split::builder()
            .account("Car Fund".into())
            .amount("-20.00".into())
            .build();
        let txn = Transaction::builder()
            .to_account("Checking".into())
            .splits(vec![split.clone()])
            .build();
        assert_eq!(vec![split], normalize_splits(vec![txn]).remove(0).splits);
    }

    #[test]
    fn every_transaction_has_a_split() {
        let transactions = vec![
            Transaction::default(),
            Transaction::builder().memo("only a memo".into()).build(),
            Transaction::builder()
                .splits(vec![Split::default(), Split::default()])
                .build(),
        ];
        let memos: Vec<_> = transactions.iter().map(|t| t.memo.clone()).collect();
        let counts: Vec<_> = transactions.iter().map(|t| t.splits.len()).collect();

        let normalized = normalize_splits(transactions);
        for ((txn, memo), count) in normalized.iter().zip(memos).zip(counts) {
            assert!(!txn.splits.is_empty());
            if count == 0 {
                assert_eq!(1, txn.splits.len());
                assert_eq!(memo, txn.splits[0].memo);
                assert_eq!("", txn.memo);
            } else {
                assert_eq!(count, txn.splits.len());
            }
        }
    }
}
