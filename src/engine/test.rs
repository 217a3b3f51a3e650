use super::dataset::Dataset;
use super::view::{compare_cells, SortDirection, SortSpec, TableEngine};
use super::window::{Window, WindowState};

use std::cmp::Ordering;

fn dataset(headers: Vec<&str>, rows: Vec<Vec<&str>>) -> Dataset {
    Dataset::new(
        headers.into_iter().map(|s| s.to_string()).collect(),
        rows.into_iter()
            .map(|row| row.into_iter().map(|s| s.to_string()).collect())
            .collect(),
    )
}

fn numbers_engine(window: Window) -> TableEngine {
    let mut engine = TableEngine::new(window);
    engine.load(dataset(
        vec!["name", "value"],
        vec![
            vec!["alpha", "10"],
            vec!["beta", "2"],
            vec!["gamma", "1"],
            vec!["delta", "30"],
        ],
    ));
    engine
}

fn visible_col(engine: &TableEngine, col: usize) -> Vec<String> {
    engine
        .current_view()
        .rows
        .iter()
        .map(|(_, cells)| cells[col].clone())
        .collect()
}

// ---- Filter ----

#[test]
fn empty_term_passes_all_rows() {
    let engine = numbers_engine(Window::paged(10));
    let view = engine.current_view();
    assert_eq!(view.filtered_count, view.total_count);
}

#[test]
fn filter_is_case_insensitive_substring_over_any_field() {
    let mut engine = numbers_engine(Window::paged(10));
    engine.set_search_term("ALPH");
    assert_eq!(visible_col(&engine, 0), vec!["alpha"]);

    // matches on the value column too
    engine.set_search_term("30");
    assert_eq!(visible_col(&engine, 0), vec!["delta"]);
}

#[test]
fn filtered_count_never_exceeds_total() {
    let mut engine = numbers_engine(Window::paged(10));
    for term in ["", "a", "zzz", "1"] {
        engine.set_search_term(term);
        let view = engine.current_view();
        assert!(view.filtered_count <= view.total_count);
    }
}

#[test]
fn filter_preserves_canonical_order() {
    let mut engine = numbers_engine(Window::paged(10));
    engine.set_search_term("a");
    // every name contains 'a'; canonical order survives
    assert_eq!(
        visible_col(&engine, 0),
        vec!["alpha", "beta", "gamma", "delta"]
    );
}

// ---- Sort ----

#[test]
fn numeric_sort_not_lexicographic() {
    let mut engine = numbers_engine(Window::paged(10));
    engine.set_sort(Some(SortSpec {
        column: 1,
        direction: SortDirection::Ascending,
    }));
    assert_eq!(visible_col(&engine, 1), vec!["1", "2", "10", "30"]);
}

#[test]
fn descending_is_exact_reverse_without_ties() {
    let mut engine = numbers_engine(Window::paged(10));
    engine.set_sort(Some(SortSpec {
        column: 1,
        direction: SortDirection::Ascending,
    }));
    let ascending = visible_col(&engine, 1);

    engine.set_sort(Some(SortSpec {
        column: 1,
        direction: SortDirection::Descending,
    }));
    let mut descending = visible_col(&engine, 1);
    descending.reverse();

    assert_eq!(ascending, descending);
}

#[test]
fn clearing_sort_restores_canonical_order() {
    let mut engine = numbers_engine(Window::paged(10));
    engine.set_sort(Some(SortSpec {
        column: 1,
        direction: SortDirection::Ascending,
    }));
    engine.set_sort(None);
    assert_eq!(visible_col(&engine, 1), vec!["10", "2", "1", "30"]);
}

#[test]
fn sort_applies_after_filter() {
    let mut engine = numbers_engine(Window::paged(10));
    engine.set_search_term("a"); // all four rows
    engine.set_sort(Some(SortSpec {
        column: 0,
        direction: SortDirection::Ascending,
    }));
    assert_eq!(
        visible_col(&engine, 0),
        vec!["alpha", "beta", "delta", "gamma"]
    );
}

#[test]
fn compare_cells_mixes_numeric_and_text() {
    assert_eq!(compare_cells("2", "10"), Ordering::Less);
    assert_eq!(compare_cells("10", "2"), Ordering::Greater);
    assert_eq!(compare_cells("2", "abc"), Ordering::Less); // raw string branch
    assert_eq!(compare_cells("b", "a"), Ordering::Greater);
    assert_eq!(compare_cells("1", "1"), Ordering::Equal);
}

// ---- Window: paged ----

#[test]
fn pages_clamp_to_bounds() {
    let mut engine = numbers_engine(Window::paged(3));
    // 4 rows, page size 3 => 2 pages
    engine.request_page(99);
    match engine.window_state() {
        WindowState::Paged {
            page, total_pages, ..
        } => {
            assert_eq!(page, 2);
            assert_eq!(total_pages, 2);
        }
        other => panic!("expected paged state, got {:?}", other),
    }
    assert_eq!(engine.current_view().rows.len(), 1);

    engine.request_page(0);
    match engine.window_state() {
        WindowState::Paged { page, .. } => assert_eq!(page, 1),
        other => panic!("expected paged state, got {:?}", other),
    }
}

#[test]
fn search_and_sort_reset_page() {
    let mut engine = numbers_engine(Window::paged(2));
    engine.request_page(2);

    engine.set_search_term("a");
    match engine.window_state() {
        WindowState::Paged { page, .. } => assert_eq!(page, 1),
        other => panic!("expected paged state, got {:?}", other),
    }

    engine.request_page(2);
    engine.set_sort(Some(SortSpec {
        column: 1,
        direction: SortDirection::Ascending,
    }));
    match engine.window_state() {
        WindowState::Paged { page, .. } => assert_eq!(page, 1),
        other => panic!("expected paged state, got {:?}", other),
    }
}

// ---- Window: incremental reveal ----

#[test]
fn reveal_starts_at_one_batch_and_grows() {
    let mut engine = numbers_engine(Window::reveal(2));
    assert_eq!(engine.current_view().rows.len(), 2);
    assert!(engine.can_reveal_more());

    engine.request_more();
    assert_eq!(engine.current_view().rows.len(), 4);
    assert!(!engine.can_reveal_more());

    // growth is idempotent at the end
    engine.request_more();
    assert_eq!(engine.current_view().rows.len(), 4);
}

#[test]
fn reveal_growth_clamps_to_filtered_count() {
    let mut engine = numbers_engine(Window::reveal(3));
    engine.request_more();
    match engine.window_state() {
        WindowState::Reveal { shown, .. } => assert_eq!(shown, 4),
        other => panic!("expected reveal state, got {:?}", other),
    }
}

#[test]
fn reveal_clamps_down_when_filter_shrinks() {
    let mut engine = numbers_engine(Window::reveal(2));
    engine.request_more(); // revealed = 4
    engine.set_search_term("alpha"); // term change resets to one batch
    match engine.window_state() {
        WindowState::Reveal { shown, batch, .. } => {
            assert_eq!(batch, 2);
            assert_eq!(shown, 1); // only one row available
        }
        other => panic!("expected reveal state, got {:?}", other),
    }
}

#[test]
fn delete_applies_reveal_shrink_clamp() {
    let mut engine = numbers_engine(Window::reveal(2));
    engine.request_more(); // revealed = 4
    engine.delete_row(3);
    match engine.window_state() {
        WindowState::Reveal { shown, available, .. } => {
            assert_eq!(available, 3);
            assert_eq!(shown, 3); // min(4, max(2, 3))
        }
        other => panic!("expected reveal state, got {:?}", other),
    }
}

// ---- Mutations ----

#[test]
fn edit_changes_one_row_and_keeps_count() {
    let mut engine = numbers_engine(Window::paged(10));
    let before = engine.current_view().total_count;

    assert!(engine.edit_row(1, vec!["BETA".to_string(), "20".to_string()]));

    let view = engine.current_view();
    assert_eq!(view.total_count, before);
    assert_eq!(visible_col(&engine, 0), vec!["alpha", "BETA", "gamma", "delta"]);
}

#[test]
fn edit_targets_underlying_row_through_sort() {
    let mut engine = numbers_engine(Window::paged(10));
    engine.set_sort(Some(SortSpec {
        column: 1,
        direction: SortDirection::Ascending,
    }));
    // view order: gamma(1), beta(2), alpha(10), delta(30); edit view pos 0
    assert!(engine.edit_row(0, vec!["gamma".to_string(), "100".to_string()]));

    engine.set_sort(None);
    assert_eq!(visible_col(&engine, 1), vec!["10", "2", "100", "30"]);
}

#[test]
fn edit_pads_short_replacement_rows() {
    let mut engine = numbers_engine(Window::paged(10));
    assert!(engine.edit_row(0, vec!["only-name".to_string()]));
    let view = engine.current_view();
    assert_eq!(view.rows[0].1, ["only-name".to_string(), String::new()]);
}

#[test]
fn delete_shifts_later_rows_down() {
    let mut engine = numbers_engine(Window::paged(10));
    assert!(engine.delete_row(1)); // beta

    let view = engine.current_view();
    assert_eq!(view.total_count, 3);
    assert_eq!(visible_col(&engine, 0), vec!["alpha", "gamma", "delta"]);
}

#[test]
fn delete_targets_underlying_row_through_filter() {
    let mut engine = numbers_engine(Window::paged(10));
    engine.set_search_term("gamma");
    assert!(engine.delete_row(0));

    engine.set_search_term("");
    assert_eq!(visible_col(&engine, 0), vec!["alpha", "beta", "delta"]);
}

#[test]
fn stale_id_removal_is_a_no_op() {
    let mut data = dataset(vec!["a"], vec![vec!["1"], vec!["2"]]);
    let id = data.ids()[0];

    assert!(data.remove(id));
    assert!(!data.remove(id)); // same target again: no-op
    assert_eq!(data.row_count(), 1);
}

#[test]
fn out_of_range_positions_are_no_ops() {
    let mut engine = numbers_engine(Window::paged(10));
    assert!(!engine.delete_row(99));
    assert!(!engine.edit_row(99, vec!["x".to_string(), "y".to_string()]));
    assert_eq!(engine.current_view().total_count, 4);
}

#[test]
fn positions_are_window_relative() {
    let mut engine = numbers_engine(Window::paged(2));
    engine.request_page(2);
    // page 2 shows gamma, delta; position 0 is gamma
    assert!(engine.delete_row(0));
    engine.request_page(1);
    assert_eq!(visible_col(&engine, 0), vec!["alpha", "beta"]);
}

// ---- Load ----

#[test]
fn load_resets_search_sort_and_window() {
    let mut engine = numbers_engine(Window::paged(2));
    engine.set_search_term("a");
    engine.set_sort(Some(SortSpec {
        column: 1,
        direction: SortDirection::Descending,
    }));
    engine.request_page(2);

    engine.load(dataset(vec!["x"], vec![vec!["1"], vec!["2"], vec!["3"]]));

    assert_eq!(engine.search_term(), "");
    assert_eq!(engine.sort_spec(), None);
    match engine.window_state() {
        WindowState::Paged { page, .. } => assert_eq!(page, 1),
        other => panic!("expected paged state, got {:?}", other),
    }
    let view = engine.current_view();
    assert_eq!(view.total_count, 3);
    assert_eq!(view.filtered_count, 3);
}

// ---- End to end ----

#[test]
fn parse_load_delete_edit_round() {
    let parsed = crate::csv::parse("a,b\n1,2\n3,4");
    assert_eq!(parsed.headers, vec!["a", "b"]);

    let mut engine = TableEngine::new(Window::paged(10));
    engine.load(Dataset::new(parsed.headers, parsed.rows));
    assert_eq!(engine.current_view().total_count, 2);

    assert!(engine.delete_row(0));
    assert_eq!(visible_col(&engine, 0), vec!["3"]);

    assert!(engine.edit_row(0, vec!["9".to_string(), "9".to_string()]));
    let view = engine.current_view();
    assert_eq!(view.rows[0].1, ["9".to_string(), "9".to_string()]);
    assert_eq!(view.total_count, 1);
}
