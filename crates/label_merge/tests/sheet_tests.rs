//! Integration tests for label sheet generation
//! Covers grid traversal, selection, start validation, visibility markers,
//! and lossless pagination across pages.

use label_merge::{
    ConfigError, CsvParser, Direction, FileSink, GridPosition, MemorySink, MergeConfig,
    MergeEngine, MergeError, Selection, SheetGeometry,
};
use label_template::{row_from_pairs, Filter, Row, Template, TemplateOptions};
use proptest::prelude::*;
use svg_tree::{parse_file, Element};

const TEMPLATE: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="60" height="30" viewBox="0 0 60 30">
  <rect class="border" width="60" height="30"/>
  <text data-text="id" class="id">ID</text>
  <g data-show="note" class="note"><text data-text="note">Note</text><circle r="2"/></g>
</svg>"#;

fn template() -> Template {
    Template::parse(TEMPLATE, Filter::default_pipeline(), TemplateOptions::default()).unwrap()
}

fn geometry(nrows: usize, ncols: usize) -> SheetGeometry {
    SheetGeometry::from_ini_str(&format!(
        "[sheet]\nnrows = {}\nncols = {}\noffx = 10\noffy = 20\nincx = 70\nincy = 40\nsizex = 210mm\nsizey = 297mm\n",
        nrows, ncols
    ))
    .unwrap()
}

fn engine(nrows: usize, ncols: usize, direction: Direction, start: GridPosition) -> MergeEngine {
    MergeEngine::new(
        MergeConfig::new(template(), geometry(nrows, ncols))
            .with_direction(direction)
            .with_start(start),
    )
    .unwrap()
}

fn numbered_rows(n: usize) -> Vec<label_merge::Result<Row>> {
    (0..n)
        .map(|i| Ok(row_from_pairs([("id", i.to_string()), ("note", String::new())])))
        .collect()
}

/// `(id, x, y)` of every label on a page, in document order
fn labels(page: &Element) -> Vec<(String, String)> {
    page.child_elements()
        .map(|g| {
            let id = g
                .child_elements()
                .find(|e| e.attr("class") == Some("id"))
                .map(|e| e.text())
                .unwrap_or_default();
            (id, g.attr("transform").unwrap_or_default().to_string())
        })
        .collect()
}

#[test]
fn test_row_direction_two_pages() {
    let mut sink = MemorySink::new();
    let summary = engine(2, 2, Direction::Row, GridPosition::default())
        .run(numbered_rows(5), &mut sink)
        .unwrap();

    assert_eq!(summary.pages, 2);
    assert_eq!(
        labels(&sink.pages()[0]),
        vec![
            ("0".to_string(), "translate(10 20)".to_string()),
            ("1".to_string(), "translate(80 20)".to_string()),
            ("2".to_string(), "translate(10 60)".to_string()),
            ("3".to_string(), "translate(80 60)".to_string()),
        ]
    );
    assert_eq!(
        labels(&sink.pages()[1]),
        vec![("4".to_string(), "translate(10 20)".to_string())]
    );
}

#[test]
fn test_selection_keeps_relative_order() {
    let data = "id,status,note\n\
                a,active,\n\
                b,retired,\n\
                c,active,\n\
                d,pending,\n\
                e,active,\n";
    let engine = MergeEngine::new(
        MergeConfig::new(template(), geometry(2, 2))
            .with_selection(Some("status=active".parse().unwrap())),
    )
    .unwrap();

    let mut sink = MemorySink::new();
    let rows = CsvParser::new().parse_reader(data.as_bytes()).unwrap();
    let summary = engine.run_reader(rows, &mut sink).unwrap();

    assert_eq!(summary.rows_read, 5);
    assert_eq!(summary.rows_placed, 3);
    assert_eq!(summary.rows_skipped, 2);
    let ids: Vec<String> = labels(&sink.pages()[0]).into_iter().map(|(id, _)| id).collect();
    assert_eq!(ids, vec!["a", "c", "e"]);
}

#[test]
fn test_selection_on_unknown_column() {
    let engine = MergeEngine::new(
        MergeConfig::new(template(), geometry(2, 2))
            .with_selection(Some(Selection::non_empty("shelf"))),
    )
    .unwrap();
    let rows = CsvParser::new()
        .parse_reader("id,note\n1,\n".as_bytes())
        .unwrap();
    let mut sink = MemorySink::new();
    assert!(matches!(
        engine.run_reader(rows, &mut sink),
        Err(MergeError::Config(ConfigError::UnknownSelectionField(_)))
    ));
    assert!(sink.pages().is_empty());
}

#[test]
fn test_start_row_outside_grid() {
    let result = MergeEngine::new(
        MergeConfig::new(template(), geometry(2, 3)).with_start(GridPosition::new(3, 0)),
    );
    assert!(matches!(
        result,
        Err(MergeError::Config(ConfigError::StartOutOfBounds { axis: "row", start: 3, max: 2 }))
    ));
}

#[test]
fn test_hidden_subtree_absent_siblings_kept() {
    let t = template();
    let hidden = t
        .generate(&row_from_pairs([("id", "7"), ("note", "")]))
        .unwrap();
    let names: Vec<&str> = hidden
        .iter()
        .filter_map(|n| n.as_element())
        .map(|e| e.local_name())
        .collect();
    assert_eq!(names, vec!["rect", "text"]);

    let shown = t
        .generate(&row_from_pairs([("id", "7"), ("note", "fragile")]))
        .unwrap();
    let group = shown
        .iter()
        .filter_map(|n| n.as_element())
        .find(|e| e.attr("class") == Some("note"))
        .unwrap();
    assert_eq!(group.text(), "fragile");
    assert!(group.find("circle").is_some());
}

#[test]
fn test_end_to_end_files() {
    let dir = tempfile::tempdir().unwrap();
    let data = dir.path().join("parts.csv");
    std::fs::write(&data, "id,note\nP-1,\nP-2,heavy\nP-3,\n").unwrap();
    let config = dir.path().join("sheet.ini");
    std::fs::write(
        &config,
        "[sheet]\nnrows=1\nncols=2\noffx=0\noffy=0\nincx=60\nincy=30\nsizex=120px\nsizey=30px\n",
    )
    .unwrap();

    let engine = MergeEngine::new(MergeConfig::new(
        template(),
        SheetGeometry::from_file(&config).unwrap(),
    ))
    .unwrap();
    let mut sink = FileSink::new(dir.path().join("out.SVG"));
    let rows = CsvParser::new().open_file(&data).unwrap();
    let summary = engine.run_reader(rows, &mut sink).unwrap();

    assert_eq!(summary.pages, 2);
    assert_eq!(sink.written().len(), 2);

    let first = parse_file(dir.path().join("out_0.svg")).unwrap();
    assert_eq!(first.attr("width"), Some("120"));
    assert_eq!(first.attr("viewBox"), Some("0 0 120 30"));
    assert!(first.descendants().all(|e| e
        .attributes()
        .iter()
        .all(|a| !a.name.starts_with("data-"))));
    assert_eq!(labels(&first).len(), 2);

    let second = parse_file(dir.path().join("out_1.svg")).unwrap();
    assert_eq!(labels(&second)[0].0, "P-3");
}

proptest! {
    #[test]
    fn pagination_is_lossless(
        nrows in 1usize..5,
        ncols in 1usize..5,
        n in 0usize..40,
        start_row_seed in 0usize..5,
        start_col_seed in 0usize..5,
        by_row in any::<bool>(),
    ) {
        let start = GridPosition::new(start_row_seed % nrows, start_col_seed % ncols);
        let direction = if by_row { Direction::Row } else { Direction::Col };
        let engine = engine(nrows, ncols, direction, start);
        let capacity = nrows * ncols;
        let start_slot = match direction {
            Direction::Row => start.row * ncols + start.col,
            Direction::Col => start.col * nrows + start.row,
        };

        let mut sink = MemorySink::new();
        let summary = engine.run(numbered_rows(n), &mut sink).unwrap();

        let expected_pages = if n == 0 { 0 } else { (n + start_slot).div_ceil(capacity) };
        prop_assert_eq!(summary.pages, expected_pages);
        prop_assert_eq!(sink.pages().len(), expected_pages);

        let ids: Vec<String> = sink
            .pages()
            .iter()
            .flat_map(|p| labels(p).into_iter().map(|(id, _)| id))
            .collect();
        let expected: Vec<String> = (0..n).map(|i| i.to_string()).collect();
        prop_assert_eq!(ids, expected);
    }

    #[test]
    fn placements_stay_on_grid(
        nrows in 1usize..5,
        ncols in 1usize..5,
        n in 1usize..30,
        by_row in any::<bool>(),
    ) {
        let direction = if by_row { Direction::Row } else { Direction::Col };
        let mut sink = MemorySink::new();
        engine(nrows, ncols, direction, GridPosition::default())
            .run(numbered_rows(n), &mut sink)
            .unwrap();

        for page in sink.pages() {
            for (_, transform) in labels(page) {
                let coords: Vec<f64> = transform
                    .trim_start_matches("translate(")
                    .trim_end_matches(')')
                    .split(' ')
                    .map(|v| v.parse().unwrap())
                    .collect();
                let (dx, dy) = (coords[0] - 10.0, coords[1] - 20.0);
                prop_assert!(dx >= 0.0 && dx <= (ncols - 1) as f64 * 70.0);
                prop_assert!(dy >= 0.0 && dy <= (nrows - 1) as f64 * 40.0);
            }
        }
    }
}
