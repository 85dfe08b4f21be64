/// The symbol that labels an epsilon transition, which consumes no input.
///
/// Automata descriptions write epsilon moves with this letter, so it can not
/// be used as an ordinary alphabet symbol.
pub const EPSILON: char = 'e';

/// Returns true iff the given symbol is the epsilon marker.
#[inline]
pub fn is_epsilon(symbol: char) -> bool {
    symbol == EPSILON
}
