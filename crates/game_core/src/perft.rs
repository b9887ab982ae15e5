use crate::ruleset::Ruleset;

/// Pure perft node count.
/// Counts all legal positions from the current one down to `depth`.
pub fn perft<R: Ruleset>(pos: &mut R, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }

    fn inner<R: Ruleset>(pos: &mut R, depth: u8, layers: &mut [Vec<R::Move>]) -> u64 {
        if depth == 0 {
            return 1;
        }

        let Some((buf, rest)) = layers.split_first_mut() else {
            return 0;
        };

        pos.legal_moves_into(buf);
        if depth == 1 {
            return buf.len() as u64;
        }

        let mut nodes = 0u64;
        for mv in buf.iter().copied() {
            let undo = pos.make_move(mv);
            nodes += inner(pos, depth - 1, rest);
            pos.unmake_move(mv, undo);
        }
        nodes
    }

    let mut layers: Vec<Vec<R::Move>> = (0..depth).map(|_| Vec::with_capacity(64)).collect();
    inner(pos, depth, &mut layers[..])
}

/// Per-move breakdown of [`perft`] at the root, useful when hunting
/// generator bugs against a reference engine.
pub fn divide<R: Ruleset>(pos: &mut R, depth: u8) -> Vec<(R::Move, u64)> {
    let mut moves = Vec::new();
    pos.legal_moves_into(&mut moves);
    moves
        .into_iter()
        .map(|mv| {
            let undo = pos.make_move(mv);
            let nodes = perft(pos, depth.saturating_sub(1));
            pos.unmake_move(mv, undo);
            (mv, nodes)
        })
        .collect()
}
