//! The prime growth sequence for bucket array sizing.
//!
//! Bucket counts are always drawn from a fixed ascending table of primes,
//! each roughly double the previous one, so that modular reduction of the
//! stored 31-bit hashes spreads entries evenly even for hash functions with
//! poor low-bit behavior. Growth saturates at [`MAX_PRIME`], the largest
//! capacity the table will ever use.

use core::fmt;

/// Largest capacity the growth sequence will produce.
///
/// This value is itself prime and sits just below `i32::MAX`, so a saturated
/// table keeps a prime bucket count and every slot index and stored hash
/// stays representable as a non-negative `i32`.
pub const MAX_PRIME: i32 = 0x7FEF_FFFD;

/// The growth table: ascending primes from 3 up to [`MAX_PRIME`].
pub const PRIMES: [i32; 104] = [
    3, 7, 11, 17, 23, 29, 37, 47, 59, 71, 89, 107, 131, 163, 197, 239, 293, 353, 431, 521, 631,
    761, 919, 1103, 1327, 1597, 1931, 2333, 2801, 3371, 4049, 4861, 5839, 7013, 8419, 10103,
    12143, 14591, 17519, 21023, 25229, 30293, 36353, 43627, 52361, 62851, 75431, 90523, 108631,
    130363, 156437, 187751, 225307, 270371, 324449, 389357, 467237, 560689, 672827, 807403,
    968897, 1162687, 1395263, 1674319, 2009191, 2411033, 2893249, 3471899, 4166287, 4999559,
    5999471, 7199369, 8639249, 10367101, 12440537, 14928671, 17914409, 21497293, 25796759,
    30956117, 37147349, 44576837, 53492207, 64190669, 77028803, 92434613, 110921543, 133105859,
    159727031, 191672443, 230006941, 276008387, 331210079, 397452101, 476942527, 572331049,
    686797261, 824156741, 988988137, 1186785773, 1424142949, 1708971541, 2050765853, MAX_PRIME,
];

/// Error returned by the growth helpers when given a negative capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapacityError {
    /// The requested capacity was negative.
    Negative,
}

impl fmt::Display for CapacityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CapacityError::Negative => write!(f, "capacity must be non-negative"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CapacityError {}

/// Returns the smallest tabulated prime greater than or equal to `minimum`.
///
/// Requests beyond the end of the table saturate at [`MAX_PRIME`].
///
/// # Examples
///
/// ```rust
/// use chain_hash::primes::CapacityError;
/// use chain_hash::primes::MAX_PRIME;
/// use chain_hash::primes::get_prime;
///
/// assert_eq!(get_prime(0), Ok(3));
/// assert_eq!(get_prime(7), Ok(7));
/// assert_eq!(get_prime(8), Ok(11));
/// assert_eq!(get_prime(i32::MAX), Ok(MAX_PRIME));
/// assert_eq!(get_prime(-1), Err(CapacityError::Negative));
/// ```
pub fn get_prime(minimum: i32) -> Result<i32, CapacityError> {
    if minimum < 0 {
        return Err(CapacityError::Negative);
    }

    let position = PRIMES.partition_point(|&prime| prime < minimum);
    Ok(PRIMES.get(position).copied().unwrap_or(MAX_PRIME))
}

/// Returns the next capacity after `old_size`: double it, then snap up to the
/// growth table.
///
/// Doubling is computed in 64 bits so sizes near the cap cannot overflow.
/// Once the doubled size passes [`MAX_PRIME`] the result stays pinned there,
/// so `expand_prime(MAX_PRIME) == Ok(MAX_PRIME)`.
///
/// # Examples
///
/// ```rust
/// use chain_hash::primes::MAX_PRIME;
/// use chain_hash::primes::expand_prime;
///
/// assert_eq!(expand_prime(3), Ok(7));
/// assert_eq!(expand_prime(7), Ok(17));
/// assert_eq!(expand_prime(MAX_PRIME), Ok(MAX_PRIME));
/// ```
pub fn expand_prime(old_size: i32) -> Result<i32, CapacityError> {
    if old_size < 0 {
        return Err(CapacityError::Negative);
    }

    let doubled = i64::from(old_size) * 2;
    if doubled > i64::from(MAX_PRIME) {
        return Ok(MAX_PRIME);
    }

    get_prime(doubled as i32)
}
