#![no_main]

use std::collections::HashSet;

use graphscope::DirectedGraph;
use libfuzzer_sys::fuzz_target;

// Each op is an opcode byte followed by two key bytes; keys are folded into a small range
// so that edges collide and cycles appear.
fuzz_target!(|data: &[u8]| {
    let graph: DirectedGraph<u8> = DirectedGraph::new();

    for op in data.chunks_exact(3) {
        let (a, b) = (op[1] % 32, op[2] % 32);
        match op[0] % 4 {
            0 => {
                graph.add_node(a);
            }
            1 => graph.add_edge(a, b),
            2 => graph.remove_edge(&a, &b),
            _ => {
                graph.remove_node(&a);
            }
        }
    }

    assert!(graph.validate().is_ok());

    let nodes = graph.vertex_nodes();
    let mut covered = HashSet::new();
    for component in graph.strongly_connected_components() {
        for key in component {
            assert!(covered.insert(key));
        }
    }
    assert_eq!(covered, nodes);

    for cycle in graph.all_cycles() {
        if cycle.len() == 1 {
            let key = cycle.iter().next().copied().unwrap_or_default();
            assert!(graph.has_edge(&key, &key));
        }
    }

    for key in &nodes {
        let closure = graph.sinks_closure(key);
        assert!(closure.contains(key));
        assert!(closure.is_subset(&graph.transitive_closure(key)));
    }
});
