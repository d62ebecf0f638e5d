//! Property tests over generated well-formed data files.

use std::collections::BTreeSet;
use std::fmt::Write;

use jdx::{Analytics, ClassKey, GraphModel, Navigator, PackageId};
use proptest::prelude::*;

/// Class counts per package, class edges and cycles, all in range.
#[derive(Debug, Clone)]
struct Graph {
    classes: Vec<usize>,
    edges: Vec<((usize, usize), (usize, usize))>,
    cycles: Vec<Vec<usize>>,
}

impl Graph {
    fn encode(&self) -> String {
        let mut text = String::from(";Generated\n;today\n;gen.data\n");
        for (p, &n) in self.classes.iter().enumerate() {
            writeln!(text, "Pp{p}").unwrap();
            for c in 0..n {
                writeln!(text, "SC{c}").unwrap();
            }
        }
        for ((sp, sc), (tp, tc)) in &self.edges {
            writeln!(text, "D{sp}.{sc}>{tp}.{tc}").unwrap();
        }
        for cycle in &self.cycles {
            text.push('C');
            for p in cycle {
                write!(text, "{p}}}").unwrap();
            }
            text.push('\n');
        }
        text
    }
}

fn class_ref(classes: Vec<usize>) -> impl Strategy<Value = (usize, usize)> {
    let keys: Vec<(usize, usize)> = classes
        .iter()
        .enumerate()
        .flat_map(|(p, &n)| (0..n).map(move |c| (p, c)))
        .collect();
    proptest::sample::select(keys)
}

fn graph() -> impl Strategy<Value = Graph> {
    prop::collection::vec(1usize..4, 1..6).prop_flat_map(|classes| {
        let packages = classes.len();
        let edge = (class_ref(classes.clone()), class_ref(classes.clone()));
        let cycle = prop::collection::vec(0..packages, 1..5);
        (
            Just(classes),
            prop::collection::vec(edge, 0..12),
            prop::collection::vec(cycle, 0..3),
        )
            .prop_map(|(classes, edges, cycles)| Graph {
                classes,
                edges,
                cycles,
            })
    })
}

proptest! {
    #[test]
    fn decoding_is_deterministic(graph in graph()) {
        let text = graph.encode();
        let a = GraphModel::parse(&text).unwrap();
        let b = GraphModel::parse(&text).unwrap();

        prop_assert_eq!(a.packages(), b.packages());
        prop_assert_eq!(a.classes_by_package(), b.classes_by_package());
        prop_assert_eq!(a.dependencies(), b.dependencies());
        prop_assert_eq!(a.cycles(), b.cycles());
        let (analytics_a, analytics_b) = (Analytics::compute(&a), Analytics::compute(&b));
        prop_assert_eq!(analytics_a.roots(), analytics_b.roots());
    }

    #[test]
    fn counts_match_the_input(graph in graph()) {
        let model = GraphModel::parse(&graph.encode()).unwrap();
        let summary = Analytics::compute(&model).summary();

        prop_assert_eq!(summary.n_packages, graph.classes.len());
        prop_assert_eq!(summary.n_classes, graph.classes.iter().sum::<usize>());
        prop_assert_eq!(summary.n_dependencies, graph.edges.len());
        prop_assert_eq!(summary.n_cycles, graph.cycles.len());
    }

    #[test]
    fn roots_are_exactly_packages_without_edges(graph in graph()) {
        let model = GraphModel::parse(&graph.encode()).unwrap();
        let analytics = Analytics::compute(&model);

        let sources: BTreeSet<usize> = graph.edges.iter().map(|((p, _), _)| *p).collect();
        let expected: Vec<PackageId> = (0..graph.classes.len())
            .filter(|p| !sources.contains(p))
            .map(|p| PackageId(u32::try_from(p).unwrap()))
            .collect();
        prop_assert_eq!(analytics.roots(), expected.as_slice());
    }

    #[test]
    fn next_hops_follow_each_occurrence(graph in graph()) {
        let model = GraphModel::parse(&graph.encode()).unwrap();
        let analytics = Analytics::compute(&model);

        for (index, cycle) in graph.cycles.iter().enumerate() {
            for (i, &p) in cycle.iter().enumerate() {
                let package = PackageId(u32::try_from(p).unwrap());
                let next = cycle[(i + 1) % cycle.len()];
                let next = PackageId(u32::try_from(next).unwrap());

                prop_assert!(analytics.package_cycles(package).contains(&index));
                prop_assert!(analytics.membership().next_hops_via(package, index).contains(&next));
                prop_assert!(analytics.next_hops(package).contains(&next));
            }
        }
    }

    #[test]
    fn following_an_import_selects_its_target(graph in graph()) {
        let model = GraphModel::parse(&graph.encode()).unwrap();
        let analytics = Analytics::compute(&model);
        let mut nav = Navigator::new(&model, &analytics);

        for ((sp, sc), (tp, tc)) in &graph.edges {
            let source = ClassKey::new(u32::try_from(*sp).unwrap(), u32::try_from(*sc).unwrap());
            let target = ClassKey::new(u32::try_from(*tp).unwrap(), u32::try_from(*tc).unwrap());

            nav.navigate_to_import(source).unwrap();
            prop_assert!(nav.import_list().unwrap().iter().any(|i| i.key == target));

            nav.navigate_to_import(target).unwrap();
            prop_assert_eq!(nav.state().class(), Some(target));
            prop_assert_eq!(nav.state().package(), Some(target.package));
        }
    }
}
