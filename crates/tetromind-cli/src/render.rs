use tetromind_engine::Board;

/// Renders the board as plain text, one character per cell with a border.
pub fn render_board(board: &Board) -> String {
    let mut out = String::with_capacity((board.width() + 3) * (board.height() + 1));
    for row in board.rows() {
        out.push('|');
        for cell in row {
            out.push(cell.as_char());
        }
        out.push('|');
        out.push('\n');
    }
    out.push('+');
    for _ in 0..board.width() {
        out.push('-');
    }
    out.push('+');
    out
}
