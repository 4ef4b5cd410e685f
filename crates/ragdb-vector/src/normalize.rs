//! The single normalization boundary between embedding producers and the
//! index. Producers emit arrays of inconsistent rank; everything is coerced
//! here, immediately before storage or query, never at call sites.

use ndarray::{ArrayD, Axis, Ix2, Ix3};
use ragdb_core::error::{Error, Result};

/// Coerce a raw embedding of rank 1-3 into a single vector of exactly `dim`
/// elements.
///
/// - rank 1: used as-is
/// - rank 2 (`tokens x hidden`): mean-pooled over the token axis
/// - rank 3 (`batch x tokens x hidden`): first batch element, then
///   mean-pooled as in the rank-2 case
/// - any other rank: [`Error::UnsupportedShape`]
///
/// A pooled vector shorter than `dim` is rejected with
/// [`Error::DimensionTooSmall`]; a longer one is truncated to its first `dim`
/// elements. Truncation is a lossy projection, not a resize; callers must
/// pair the index with a compatible producer or accept the loss.
///
/// An all-zero vector of length `dim` is accepted; it is the degenerate
/// representation producers emit for empty input text.
pub fn normalize(raw: &ArrayD<f32>, dim: usize) -> Result<Vec<f32>> {
    let pooled: Vec<f32> = match raw.ndim() {
        1 => raw.iter().copied().collect(),
        2 => {
            let view = raw
                .view()
                .into_dimensionality::<Ix2>()
                .map_err(|_| unsupported(raw))?;
            view.mean_axis(Axis(0)).ok_or_else(|| unsupported(raw))?.to_vec()
        }
        3 => {
            let view = raw
                .view()
                .into_dimensionality::<Ix3>()
                .map_err(|_| unsupported(raw))?;
            if view.shape()[0] == 0 {
                return Err(unsupported(raw));
            }
            let first = view.index_axis(Axis(0), 0);
            first.mean_axis(Axis(0)).ok_or_else(|| unsupported(raw))?.to_vec()
        }
        _ => return Err(unsupported(raw)),
    };

    if pooled.len() < dim {
        return Err(Error::DimensionTooSmall { got: pooled.len(), want: dim });
    }

    let mut out = pooled;
    out.truncate(dim);
    Ok(out)
}

fn unsupported(raw: &ArrayD<f32>) -> Error {
    Error::UnsupportedShape { rank: raw.ndim(), dims: raw.shape().to_vec() }
}
