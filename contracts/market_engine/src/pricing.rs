use crate::storage::BASIS_POINTS;

/// Split a gross sale amount into (royalty, commission, seller) shares.
///
/// Formula: royalty = amount × royalty_bps / 10,000
///          commission = amount × commission_bps / 10,000
///          seller = amount − royalty − commission
///
/// The integer-division remainder is left in the seller share, so the
/// three parts always sum to `amount` exactly.
///
/// Returns `None` for negative amounts or when the two rates together
/// exceed 100%.
pub fn split_proceeds(
    amount: i128,
    royalty_bps: u32,
    commission_bps: u32,
) -> Option<(i128, i128, i128)> {
    if amount < 0 {
        return None;
    }
    let combined = royalty_bps.checked_add(commission_bps)?;
    if combined > BASIS_POINTS {
        return None;
    }

    let royalty = amount
        .checked_mul(royalty_bps as i128)?
        .checked_div(BASIS_POINTS as i128)?;
    let commission = amount
        .checked_mul(commission_bps as i128)?
        .checked_div(BASIS_POINTS as i128)?;
    let seller = amount.checked_sub(royalty)?.checked_sub(commission)?;

    Some((royalty, commission, seller))
}
