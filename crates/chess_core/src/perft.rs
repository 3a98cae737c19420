use crate::rules::Rules;
use crate::types::Move;

/// Pure perft node count.
/// Counts all legal positions from the current one down to `depth`, walking
/// the tree with apply/undo so the position is unchanged afterwards.
pub fn perft<R: Rules>(pos: &mut R, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }

    fn inner<R: Rules>(pos: &mut R, depth: u8, layers: &mut [Vec<Move>]) -> u64 {
        let Some((buf, rest)) = layers.split_first_mut() else {
            return 1;
        };

        pos.legal_moves_into(buf);
        if depth == 1 {
            return buf.len() as u64;
        }

        let mut nodes = 0u64;
        for mv in buf.iter().copied() {
            pos.apply(mv);
            nodes += inner(pos, depth - 1, rest);
            pos.undo();
        }
        nodes
    }

    let mut layers = vec![Vec::with_capacity(64); depth as usize];
    inner(pos, depth, &mut layers[..])
}
