use std::{
    io::{self, Write},
    mem::MaybeUninit,
    os::fd::AsRawFd,
};

use lib_2048::{Axis, Board, Tile, BOARD_SIZE};

const SQUARE_HEIGHT: usize = 3;
const TOP_ROW: &[u8] = "┏━━━━━━━┳━━━━━━━┳━━━━━━━┳━━━━━━━┓\n".as_bytes();
const SEPERATOR_ROW: &[u8] = "┣━━━━━━━╋━━━━━━━╋━━━━━━━╋━━━━━━━┫\n".as_bytes();
const BOTTOM_ROW: &[u8] = "┗━━━━━━━┻━━━━━━━┻━━━━━━━┻━━━━━━━┛\n".as_bytes();
const EMPTY_ROW: &[u8] = "┃       ┃       ┃       ┃       ┃\n".as_bytes();
const EMPTY_CELL: &[u8] = "┃       ".as_bytes();
const COLOUR_TABLE: [u8; 7] = [90, 33, 31, 32, 33, 36, 35];

// Status line, top border, cell lines, separators and bottom border.
const BOARD_LINES: usize = 1 + 1 + SQUARE_HEIGHT * BOARD_SIZE + (BOARD_SIZE - 1) + 1;

fn tile_colour(tile: Tile) -> u8 {
    let exponent = tile.exponent().saturating_sub(1) as usize;

    COLOUR_TABLE[exponent % COLOUR_TABLE.len()]
}

fn draw_padding(out: &mut impl Write, row: &[Option<Tile>]) -> io::Result<()> {
    for cell in row {
        match cell {
            Some(tile) => write!(out, "┃\x1b[{}m       \x1b[m", tile_colour(*tile) + 10)?,
            None => out.write_all(EMPTY_CELL)?,
        }
    }

    Ok(())
}

fn draw_board_row(out: &mut impl Write, row: &[Option<Tile>]) -> io::Result<()> {
    for _ in 0..((SQUARE_HEIGHT - 1) / 2) {
        draw_padding(out, row)?;
    }

    out.write_all(b"\x1b[E")?;

    for cell in row {
        match cell {
            Some(tile) => {
                let colour = tile_colour(*tile);
                write!(out, "┃\x1b[7m\x1b[{colour}m{:^7}\x1b[m", tile.value)?;
            }
            None => out.write_all(EMPTY_CELL)?,
        }
    }

    out.write_all(b"\x1b[E")?;

    for _ in 0..((SQUARE_HEIGHT - 1).div_ceil(2)) {
        draw_padding(out, row)?;
    }

    Ok(())
}

pub fn draw_board(out: &mut impl Write, board: &Board, status: &str) -> io::Result<()> {
    write!(out, "\n{status}\n")?;
    out.write_all(TOP_ROW)?;

    for i in 0..BOARD_SIZE {
        if i != 0 {
            out.write_all(SEPERATOR_ROW)?;
        }

        for _ in 0..SQUARE_HEIGHT {
            out.write_all(EMPTY_ROW)?;
        }
    }

    out.write_all(BOTTOM_ROW)?;

    redraw_board(out, &Board::new(), board, status)
}

/// Repaints the status line and every row whose tiles differ from `old_board`.
pub fn redraw_board(
    out: &mut impl Write,
    old_board: &Board,
    new_board: &Board,
    status: &str,
) -> io::Result<()> {
    write!(out, "\x1b[{BOARD_LINES}F\x1b[2K{status}")?;
    let mut current_line = BOARD_LINES;

    let changed_rows =
        (0..BOARD_SIZE).filter(|&i| old_board.line(Axis::Row, i) != new_board.line(Axis::Row, i));

    for row in changed_rows {
        let final_row_to_end = (SQUARE_HEIGHT - 1).div_ceil(2) + 2;
        let between_rows = SQUARE_HEIGHT + 1;
        let target_line = final_row_to_end + between_rows * (BOARD_SIZE - 1 - row) + 1;

        if target_line > current_line {
            write!(out, "\x1b[{}F", target_line - current_line)?;
        } else {
            write!(out, "\x1b[{}E", current_line - target_line)?;
        }

        draw_board_row(out, &new_board.line(Axis::Row, row))?;
        current_line = target_line - 2;
    }

    write!(out, "\x1b[{current_line}E")?;
    out.flush()
}

pub type TerminalState = libc::termios;

/// Switches the terminal to unbuffered, no-echo input. Returns the previous settings.
pub fn setup_terminal(fd: &impl AsRawFd) -> io::Result<TerminalState> {
    let fd = fd.as_raw_fd();
    let mut termios = MaybeUninit::uninit();

    let original = unsafe {
        if libc::tcgetattr(fd, termios.as_mut_ptr()) != 0 {
            return Err(io::Error::last_os_error());
        }

        termios.assume_init()
    };

    let mut termios = original;
    termios.c_lflag &= !(libc::ECHO | libc::ICANON);

    unsafe {
        if libc::tcsetattr(fd, libc::TCSADRAIN, &termios) != 0 {
            return Err(io::Error::last_os_error());
        }
    }

    Ok(original)
}

pub fn restore_terminal(fd: &impl AsRawFd, state: &TerminalState) -> io::Result<()> {
    unsafe {
        if libc::tcsetattr(fd.as_raw_fd(), libc::TCSADRAIN, state) != 0 {
            return Err(io::Error::last_os_error());
        }
    }

    Ok(())
}
