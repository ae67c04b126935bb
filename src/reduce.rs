//! Blocking global reductions over an MPI communicator.
//!
//! Every rank of the communicator must call the same operation with the
//! same buffer length and element type; a rank that never calls stalls
//! the whole group. There is no timeout or cancellation here. The
//! element type is dispatched at compile time through the [`Equivalence`]
//! bound, so an unsupported type fails to build instead of silently
//! summing garbage. Summation order across ranks is whatever MPI picks,
//! so results need not be bit-identical for different rank counts.

use mpi::collective::SystemOperation;
use mpi::traits::*;
use num::Zero;

/// Elementwise sum of `local` across every rank, delivered to `root`
/// only. Returns `Some(total)` at `root` and `None` elsewhere.
///
/// Must be called on all ranks. Debug builds first agree on the buffer
/// length and panic on a mismatch rather than hanging inside MPI.
pub fn reduce_sum<T, C>(comm: &C, local: &[T], root: i32) -> Option<Vec<T>>
where
    T: Equivalence + Zero + Clone,
    C: Communicator,
{
    #[cfg(debug_assertions)]
    check_matching_length(comm, local.len());

    if comm.rank() == root {
        let mut global = vec![T::zero(); local.len()];
        comm.process_at_rank(root)
            .reduce_into_root(local, &mut global[..], SystemOperation::sum());
        Some(global)
    } else {
        comm.process_at_rank(root)
            .reduce_into(local, SystemOperation::sum());
        None
    }
}

/// Elementwise sum of `local` across every rank, delivered to all of
/// them. Must be called on all ranks.
pub fn all_reduce_sum<T, C>(comm: &C, local: &[T]) -> Vec<T>
where
    T: Equivalence + Zero + Clone,
    C: Communicator,
{
    #[cfg(debug_assertions)]
    check_matching_length(comm, local.len());

    let mut global = vec![T::zero(); local.len()];
    comm.all_reduce_into(local, &mut global[..], SystemOperation::sum());
    global
}

/// Single-value form of [`reduce_sum`].
pub fn reduce_sum_scalar<T, C>(comm: &C, local: T, root: i32) -> Option<T>
where
    T: Equivalence + Zero,
    C: Communicator,
{
    if comm.rank() == root {
        let mut global = T::zero();
        comm.process_at_rank(root)
            .reduce_into_root(&local, &mut global, SystemOperation::sum());
        Some(global)
    } else {
        comm.process_at_rank(root)
            .reduce_into(&local, SystemOperation::sum());
        None
    }
}

/// Single-value form of [`all_reduce_sum`].
pub fn all_reduce_sum_scalar<T, C>(comm: &C, local: T) -> T
where
    T: Equivalence + Zero,
    C: Communicator,
{
    let mut global = T::zero();
    comm.all_reduce_into(&local, &mut global, SystemOperation::sum());
    global
}

/// Ranks disagreeing on the buffer length would hang inside MPI or
/// silently mis-sum; fail fast instead. Runs on every rank, so it
/// cannot introduce a hang of its own.
#[cfg(debug_assertions)]
fn check_matching_length(comm: &impl Communicator, len: usize) {
    let mut shortest = 0usize;
    let mut longest = 0usize;
    comm.all_reduce_into(&len, &mut shortest, SystemOperation::min());
    comm.all_reduce_into(&len, &mut longest, SystemOperation::max());
    assert!(
        shortest == longest,
        "reduction buffer length differs across ranks: min = {}, max = {}, local = {}",
        shortest,
        longest,
        len
    );
}
