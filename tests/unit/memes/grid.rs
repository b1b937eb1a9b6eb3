use super::*;

fn dims(n: usize) -> (u32, u32) {
    let d = grid_dims(n);
    (d.cols, d.rows)
}

#[test]
fn lookup_table_for_small_sets() {
    assert_eq!(dims(1), (1, 1));
    assert_eq!(dims(2), (1, 2));
    assert_eq!(dims(3), (2, 2));
    assert_eq!(dims(4), (2, 2));
    assert_eq!(dims(5), (2, 3));
    assert_eq!(dims(6), (2, 3));
    assert_eq!(dims(7), (3, 3));
    assert_eq!(dims(9), (3, 3));
}

#[test]
fn large_sets_are_near_square() {
    assert_eq!(dims(10), (4, 3));
    assert_eq!(dims(16), (4, 4));
    assert_eq!(dims(17), (5, 4));
    for n in 10..64 {
        assert!(grid_dims(n).cells() as usize >= n);
    }
}

#[test]
fn cells_fill_rows_first_and_tile_the_area() {
    let area = Rect::new(0.0, 0.0, 1080.0, 1920.0);
    let cells = grid_cells(3, area);
    assert_eq!(cells.len(), 3);
    assert_eq!(cells[0], Rect::new(0.0, 0.0, 540.0, 960.0));
    assert_eq!(cells[1], Rect::new(540.0, 0.0, 1080.0, 960.0));
    assert_eq!(cells[2], Rect::new(0.0, 960.0, 540.0, 1920.0));
}

#[test]
fn two_items_stack_vertically() {
    let cells = grid_cells(2, Rect::new(0.0, 0.0, 1080.0, 1920.0));
    assert_eq!(cells[0].width(), 1080.0);
    assert_eq!(cells[1].y0, 960.0);
}

#[test]
fn no_items_no_cells() {
    assert!(grid_cells(0, Rect::new(0.0, 0.0, 10.0, 10.0)).is_empty());
}
