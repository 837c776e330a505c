//! First-expired-first-out allocation of a requested quantity over batches

use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchStock {
    pub batch_id: i64,
    pub expires_on: NaiveDate,
    pub available: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Allocation {
    pub batch_id: i64,
    pub quantity: u32,
}

/// Not enough units across all batches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shortfall {
    pub requested: u32,
    pub available: u32,
}

/// Take units from the earliest-expiring batches first.
/// Ties on expiry fall back to the lower batch id.
pub fn allocate_fefo(batches: &[BatchStock], requested: u32) -> Result<Vec<Allocation>, Shortfall> {
    let available: u64 = batches.iter().map(|b| b.available as u64).sum();
    if (requested as u64) > available {
        return Err(Shortfall {
            requested,
            available: available.min(u32::MAX as u64) as u32,
        });
    }

    let mut ordered: Vec<&BatchStock> = batches.iter().filter(|b| b.available > 0).collect();
    ordered.sort_by_key(|b| (b.expires_on, b.batch_id));

    let mut remaining = requested;
    let mut allocations = Vec::new();
    for batch in ordered {
        if remaining == 0 {
            break;
        }
        let take = remaining.min(batch.available);
        allocations.push(Allocation {
            batch_id: batch.batch_id,
            quantity: take,
        });
        remaining -= take;
    }
    Ok(allocations)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stock(id: i64, expires: &str, available: u32) -> BatchStock {
        BatchStock {
            batch_id: id,
            expires_on: NaiveDate::parse_from_str(expires, "%Y-%m-%d").unwrap(),
            available,
        }
    }

    #[test]
    fn test_consumes_earliest_expiry_first() {
        let batches = vec![
            stock(1, "2026-05-01", 10),
            stock(2, "2025-12-01", 3),
            stock(3, "2026-01-15", 5),
        ];
        let result = allocate_fefo(&batches, 6).unwrap();
        assert_eq!(
            result,
            vec![
                Allocation { batch_id: 2, quantity: 3 },
                Allocation { batch_id: 3, quantity: 3 },
            ]
        );
    }

    #[test]
    fn test_exact_stock_is_fully_consumed() {
        let batches = vec![stock(1, "2026-01-01", 2), stock(2, "2026-01-01", 2)];
        let result = allocate_fefo(&batches, 4).unwrap();
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].batch_id, 1);
        assert_eq!(result.iter().map(|a| a.quantity).sum::<u32>(), 4);
    }

    #[test]
    fn test_shortfall_reports_available() {
        let batches = vec![stock(1, "2026-01-01", 2), stock(2, "2026-02-01", 0)];
        assert_eq!(
            allocate_fefo(&batches, 5),
            Err(Shortfall {
                requested: 5,
                available: 2
            })
        );
        assert!(allocate_fefo(&[], 1).is_err());
    }
}
