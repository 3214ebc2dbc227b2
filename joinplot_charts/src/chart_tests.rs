// Copyright 2025 the joinplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

extern crate std;

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use joinplot_core::{Attr, AttrValue, ElementKind, NodeId, RetainedSurface, Surface};
use kurbo::{Affine, Size};
use peniko::Color;

use crate::{
    AxisName, ChartConfig, ChartError, ChartState, Dataset, Host, PointMarkSpec, Record,
    ScatterChart, ScatterPoint,
};

fn iris() -> Dataset {
    [
        ("5.1", "3.5", "setosa"),
        ("7.0", "3.2", "versicolor"),
        ("6.3", "3.3", "virginica"),
        ("4.9", "3.0", "setosa"),
    ]
    .into_iter()
    .map(|(l, w, s)| row(l, w, s))
    .collect()
}

fn row(l: &str, w: &str, s: &str) -> Record {
    Record::new()
        .with("sepal_length", l)
        .with("sepal_width", w)
        .with("Species", s)
}

fn instant() -> ChartConfig {
    ChartConfig::default().with_axis_transition_ms(0)
}

fn chart_with(config: ChartConfig, size: Size) -> ScatterChart<RetainedSurface> {
    let (surface, _) = RetainedSurface::with_svg(size);
    let mut chart = ScatterChart::new(Host::from_root(surface), config);
    chart.init().unwrap();
    chart
}

fn selected_chart() -> ScatterChart<RetainedSurface> {
    let mut chart = chart_with(instant(), Size::new(600.0, 400.0));
    chart.set_data(iris()).unwrap();
    chart.select_field(AxisName::X, "sepal_length").unwrap();
    chart.select_field(AxisName::Y, "sepal_width").unwrap();
    chart
}

fn circles(chart: &ScatterChart<RetainedSurface>) -> Vec<NodeId> {
    let container = chart.marks_container().unwrap();
    chart
        .host()
        .surface()
        .select_all(container, PointMarkSpec::new().selector())
}

fn fills(chart: &ScatterChart<RetainedSurface>) -> Vec<Color> {
    let s = chart.host().surface();
    circles(chart)
        .into_iter()
        .map(|c| s.attr(c, Attr::Fill).and_then(AttrValue::as_color).unwrap())
        .collect()
}

fn positions(chart: &ScatterChart<RetainedSurface>) -> Vec<(f64, f64)> {
    let s = chart.host().surface();
    circles(chart)
        .into_iter()
        .map(|c| {
            let cx = s.attr(c, Attr::Cx).and_then(AttrValue::as_number).unwrap();
            let cy = s.attr(c, Attr::Cy).and_then(AttrValue::as_number).unwrap();
            (cx, cy)
        })
        .collect()
}

/// Every node below the root, in document order, with its committed attributes.
fn snapshot(s: &RetainedSurface) -> Vec<(ElementKind, Vec<(Attr, AttrValue)>)> {
    fn walk(
        s: &RetainedSurface,
        node: NodeId,
        out: &mut Vec<(ElementKind, Vec<(Attr, AttrValue)>)>,
    ) {
        for &child in s.children(node) {
            let attrs = s.attrs(child).into_iter().map(|(a, v)| (a, v.clone())).collect();
            out.push((s.kind(child).unwrap(), attrs));
            walk(s, child, out);
        }
    }
    let mut out = Vec::new();
    walk(s, s.root(), &mut out);
    out
}

#[test]
fn point_count_matches_the_dataset() {
    let chart = selected_chart();
    assert_eq!(chart.points().len(), 4);
    assert_eq!(circles(&chart).len(), 4);
}

#[test]
fn unselected_fields_render_no_points() {
    let mut chart = chart_with(instant(), Size::new(600.0, 400.0));
    let report = chart.set_data(iris()).unwrap().unwrap();
    assert!(chart.points().is_empty());
    assert_eq!(report.marks.bound(), 0);
    assert_eq!(report.x_domain, (0.0, 1.0));
    assert_eq!(report.y_domain, (0.0, 1.0));

    let report = chart.select_field(AxisName::X, "sepal_length").unwrap().unwrap();
    assert_eq!(report.marks.bound(), 0);
    assert_eq!(report.x_domain, (0.0, 7.0));
    assert_eq!(report.y_domain, (0.0, 1.0));
}

#[test]
fn rerunning_on_unchanged_input_is_idempotent() {
    let mut chart = selected_chart();
    let before_positions = positions(&chart);
    let before = snapshot(chart.host().surface());

    let report = chart.update().unwrap().unwrap();
    assert!(report.marks.is_stable());
    assert!(report.x_ticks.is_stable());
    assert!(report.y_ticks.is_stable());
    assert_eq!(positions(&chart), before_positions);
    assert_eq!(snapshot(chart.host().surface()), before);
}

#[test]
fn appending_a_record_enters_exactly_one_mark() {
    let mut chart = selected_chart();
    let before = fills(&chart);

    let mut grown: Vec<Record> = iris().records().to_vec();
    grown.push(row("5.8", "2.7", "virginica"));
    let report = chart.set_data(grown).unwrap().unwrap();

    assert_eq!(
        (report.marks.entered, report.marks.exited, report.marks.updated),
        (1, 0, 5)
    );
    assert_eq!(fills(&chart)[..4], before[..]);
}

#[test]
fn removing_the_last_record_exits_exactly_one_mark() {
    let mut chart = selected_chart();
    let before = fills(&chart);
    let first_three = circles(&chart)[..3].to_vec();

    let shrunk: Vec<Record> = iris().records()[..3].to_vec();
    let report = chart.set_data(shrunk).unwrap().unwrap();

    assert_eq!((report.marks.entered, report.marks.exited), (0, 1));
    assert_eq!(circles(&chart), first_three);
    assert_eq!(fills(&chart)[..], before[..3]);
}

#[test]
fn reordering_moves_marks_without_entering_or_recoloring() {
    let mut chart = selected_chart();
    let marks = circles(&chart);
    let fills_before = fills(&chart);
    let positions_before = positions(&chart);

    let mut reversed: Vec<Record> = iris().records().to_vec();
    reversed.reverse();
    let report = chart.set_data(reversed).unwrap().unwrap();

    assert!(report.marks.is_stable());
    assert_eq!(circles(&chart), marks);
    // Fill stays with the mark, not the record it now shows.
    assert_eq!(fills(&chart), fills_before);
    let mut expected = positions_before;
    expected.reverse();
    assert_eq!(positions(&chart), expected);
}

#[test]
fn category_colors_are_stable_across_runs() {
    let mut a = selected_chart();
    let first = fills(&a);
    a.update().unwrap();
    assert_eq!(fills(&a), first);

    let b = selected_chart();
    assert_eq!(fills(&b), first);
    // setosa appears first and last.
    assert_eq!(first[0], first[3]);
    assert_ne!(first[0], first[1]);
    assert_ne!(first[1], first[2]);
}

#[test]
fn two_record_example() {
    let data: Dataset = [("1", "2", "a"), ("3", "4", "b")]
        .into_iter()
        .map(|(x, y, s)| Record::new().with("x", x).with("y", y).with("Species", s))
        .collect();
    let mut chart = chart_with(instant(), Size::new(600.0, 400.0));
    chart.set_data(data).unwrap();
    chart.select_field(AxisName::X, "x").unwrap();
    let report = chart.select_field(AxisName::Y, "y").unwrap().unwrap();

    assert_eq!(
        chart.points(),
        vec![
            ScatterPoint {
                x: 1.0,
                y: 2.0,
                category: String::from("a"),
            },
            ScatterPoint {
                x: 3.0,
                y: 4.0,
                category: String::from("b"),
            },
        ]
    );
    assert_eq!(report.x_domain, (0.0, 3.0));
    assert_eq!(report.y_domain, (0.0, 4.0));
    // x: 540 px over [0, 3]; y: 350 px over [0, 4], inverted.
    assert_eq!(positions(&chart), vec![(180.0, 175.0), (540.0, 0.0)]);
}

#[test]
fn animated_and_instant_runs_end_in_the_same_state() {
    let mut instant_chart = chart_with(instant(), Size::new(600.0, 400.0));
    let mut animated = chart_with(ChartConfig::default(), Size::new(600.0, 400.0));
    for chart in [&mut instant_chart, &mut animated] {
        chart.set_data(iris()).unwrap();
        chart.select_field(AxisName::X, "sepal_length").unwrap();
        chart.select_field(AxisName::Y, "sepal_width").unwrap();
        chart.select_field(AxisName::Y, "sepal_length").unwrap();
    }
    assert!(animated.host().surface().is_animating());
    assert_eq!(
        snapshot(instant_chart.host().surface()),
        snapshot(animated.host().surface())
    );

    let surface = animated.host_mut().surface_mut();
    surface.settle();
    assert!(!surface.is_animating());
    let s = animated.host().surface();
    let ticks = s.select_all(s.root(), joinplot_core::Selector::new(ElementKind::Group).with_class("tick"));
    for tick in ticks {
        assert_eq!(s.displayed_attr(tick, Attr::Transform).as_ref(), s.attr(tick, Attr::Transform));
    }
}

#[test]
fn undersized_surface_passes_negative_extents_through() {
    let mut chart = chart_with(instant(), Size::new(30.0, 20.0));
    chart.set_data(iris()).unwrap();
    chart.select_field(AxisName::X, "sepal_length").unwrap();
    let report = chart.select_field(AxisName::Y, "sepal_width").unwrap().unwrap();

    assert_eq!(report.dimensions.inner_width, -30.0);
    assert_eq!(report.dimensions.inner_height, -30.0);
    assert_eq!(report.marks.bound(), 4);
    for (cx, cy) in positions(&chart) {
        assert!(cx <= 0.0);
        assert!(cy <= 0.0);
    }
}

#[test]
fn resizes_are_picked_up_by_the_next_update() {
    let mut chart = selected_chart();
    let svg = chart.host().svg().unwrap();
    chart
        .host_mut()
        .surface_mut()
        .set_client_size(svg, Size::new(800.0, 500.0))
        .unwrap();
    let report = chart.update().unwrap().unwrap();
    assert_eq!(report.dimensions.inner_width, 740.0);
    assert_eq!(report.dimensions.inner_height, 450.0);

    let s = chart.host().surface();
    let x_axis = s
        .select(svg, joinplot_core::Selector::new(ElementKind::Group).with_class("xAxisContainer"))
        .unwrap();
    assert_eq!(
        s.attr(x_axis, Attr::Transform),
        Some(&AttrValue::Transform(Affine::translate((40.0, 460.0))))
    );
}

#[test]
fn malformed_values_place_points_at_the_origin() {
    let mut chart = selected_chart();
    let data = vec![row("oops", "3.0", "setosa"), row("6.0", "", "setosa")];
    let report = chart.set_data(data).unwrap().unwrap();
    // NaN is ignored by the max; blank text counts as zero.
    assert_eq!(report.x_domain, (0.0, 6.0));
    assert_eq!(report.y_domain, (0.0, 3.0));
    assert_eq!(report.marks.bound(), 2);
    assert_eq!(positions(&chart), vec![(0.0, 0.0), (540.0, 350.0)]);
}

#[test]
fn infinite_values_leave_the_axis_without_ticks() {
    let mut chart = selected_chart();
    let data = vec![row("1e400", "3.0", "setosa"), row("2.0", "Infinity", "virginica")];
    let report = chart.set_data(data).unwrap().unwrap();
    assert_eq!(report.x_domain, (0.0, f64::INFINITY));
    assert_eq!(report.y_domain, (0.0, f64::INFINITY));
    assert_eq!(report.x_ticks.bound(), 0);
    assert_eq!(report.y_ticks.bound(), 0);
    assert_eq!(report.marks.bound(), 2);

    let s = chart.host().surface();
    let ticks = s.select_all(
        s.root(),
        joinplot_core::Selector::new(ElementKind::Group).with_class("tick"),
    );
    assert!(ticks.is_empty());

    // A misspelled infinity is malformed, not infinite.
    let report = chart.set_data(vec![row("inf", "2.0", "setosa")]).unwrap().unwrap();
    assert_eq!(report.x_domain, (0.0, 1.0));
    assert_eq!(report.y_domain, (0.0, 2.0));
}

#[test]
fn clearing_a_field_exits_every_mark() {
    let mut chart = selected_chart();
    let report = chart.select_field(AxisName::Y, "").unwrap().unwrap();
    assert_eq!(report.marks.exited, 4);
    assert!(circles(&chart).is_empty());
    assert_eq!(chart.selection().y(), None);
}

#[test]
fn captions_show_the_selected_fields() {
    let mut chart = chart_with(instant(), Size::new(600.0, 400.0));
    let s = chart.host().surface();
    let labels = |s: &RetainedSurface| -> Vec<String> {
        s.select_all(s.root(), joinplot_core::Selector::new(ElementKind::Text).with_class("label"))
            .into_iter()
            .map(|t| String::from(s.attr(t, Attr::Content).and_then(AttrValue::as_text).unwrap()))
            .collect()
    };
    assert_eq!(labels(s), ["", ""]);
    chart.select_field(AxisName::Y, "petal_width").unwrap();
    assert_eq!(labels(chart.host().surface()), ["", "petal_width"]);
}

#[test]
fn lifecycle_follows_the_state_machine() {
    let (surface, svg) = RetainedSurface::with_svg(Size::new(600.0, 400.0));
    let mut chart = ScatterChart::new(Host::from_root(surface), instant());
    assert_eq!(chart.state(), ChartState::Uninitialized);

    // Before init, changes are stored but nothing is drawn.
    assert_eq!(chart.set_data(iris()).unwrap(), None);
    assert_eq!(chart.select_field(AxisName::X, "sepal_length").unwrap(), None);
    assert_eq!(chart.select_field(AxisName::Y, "sepal_width").unwrap(), None);
    assert!(chart.host().surface().children(svg).is_empty());

    let report = chart.init().unwrap().unwrap();
    assert_eq!(chart.state(), ChartState::Rendered);
    assert_eq!(report.marks.entered, 4);
    let s = chart.host().surface();
    let classes: Vec<&str> = s
        .children(svg)
        .iter()
        .map(|&c| s.attr(c, Attr::Class).and_then(AttrValue::as_text).unwrap())
        .collect();
    assert_eq!(
        classes,
        [
            "xAxisContainer",
            "yAxisContainer",
            "xLabelContainer",
            "yLabelContainer",
            "dataContainer"
        ]
    );

    chart.select_field(AxisName::X, "sepal_width").unwrap();
    assert_eq!(chart.state(), ChartState::Rendered);
    assert_eq!(chart.init().unwrap(), None);

    chart.destroy().unwrap();
    assert_eq!(chart.state(), ChartState::Destroyed);
    assert!(chart.host().surface().children(svg).is_empty());
    assert_eq!(chart.update().unwrap(), None);
    assert_eq!(chart.set_data(iris()).unwrap(), None);
    assert!(chart.host().surface().children(svg).is_empty());
}

#[test]
fn init_without_a_mounted_surface_fails() {
    let mut chart = ScatterChart::new(Host::from_root(RetainedSurface::new()), instant());
    let root = chart.host().container();
    assert_eq!(chart.init(), Err(ChartError::MissingSurface(root)));
    assert_eq!(chart.state(), ChartState::Uninitialized);
}

#[test]
fn each_selection_in_a_burst_renders_fully() {
    let mut chart = selected_chart();
    for field in ["sepal_width", "sepal_length", "sepal_width"] {
        let report = chart.select_field(AxisName::X, field).unwrap().unwrap();
        assert_eq!(report.marks.bound(), 4);
        assert!(report.marks.is_stable());
    }
    assert_eq!(chart.selection().x(), Some("sepal_width"));
}
