/*
 * SPDX-FileCopyrightText: 2026 The par-betweenness authors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use anyhow::Result;
use dsi_progress_logger::concurrent_progress_logger;
use par_betweenness::centrality::{BetweennessCentrality, BetweennessError};
use par_betweenness::graphs::csr_graph::CsrGraph;
use par_betweenness::graphs::random::ErdosRenyi;
use par_betweenness::selection::{All, ExplicitSelection, RandomSelection, SelectionStrategy};
use par_betweenness::traits::{Graph, Orientation};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Textbook sequential Brandes, visiting from the sources accepted by
/// `select`, with floating-point path counts.
fn reference(graph: &CsrGraph, select: impl Fn(usize) -> bool) -> Vec<f64> {
    let n = graph.num_nodes();
    let mut centrality = vec![0.0; n];
    for s in (0..n).filter(|&s| select(s)) {
        let mut distance = vec![-1_i64; n];
        let mut sigma = vec![0.0_f64; n];
        let mut delta = vec![0.0_f64; n];
        let mut preds = vec![vec![]; n];
        let mut stack = vec![];
        let mut queue = VecDeque::from([s]);
        distance[s] = 0;
        sigma[s] = 1.0;
        while let Some(v) = queue.pop_front() {
            stack.push(v);
            for &w in graph.successors(v) {
                if distance[w] < 0 {
                    distance[w] = distance[v] + 1;
                    queue.push_back(w);
                }
                if distance[w] == distance[v] + 1 {
                    sigma[w] += sigma[v];
                    preds[w].push(v);
                }
            }
        }
        while let Some(w) = stack.pop() {
            for &v in &preds[w] {
                delta[v] += sigma[v] / sigma[w] * (1.0 + delta[w]);
            }
            if w != s {
                centrality[w] += delta[w];
            }
        }
    }
    if graph.orientation() == Orientation::Undirected {
        centrality.iter_mut().for_each(|c| *c /= 2.0);
    }
    centrality
}

fn assert_close(actual: &[f64], expected: &[f64]) {
    assert_eq!(actual.len(), expected.len());
    for (node, (&a, &e)) in actual.iter().zip(expected).enumerate() {
        assert!(
            (a - e).abs() <= 1E-9 * e.abs().max(1.0),
            "Node {node}: got {a}, expected {e}"
        );
    }
}

fn exact(graph: &CsrGraph, concurrency: usize) -> Result<Box<[f64]>> {
    Ok(BetweennessCentrality::new(graph, All::default(), concurrency)?.compute()?)
}

fn path(n: usize, orientation: Orientation) -> CsrGraph {
    CsrGraph::from_arcs_with_num_nodes(n, orientation, (1..n).map(|i| (i - 1, i)))
}

#[test]
fn test_star() -> Result<()> {
    for k in [1, 2, 5, 10] {
        let graph = CsrGraph::from_arcs(Orientation::Undirected, (1..=k).map(|leaf| (0, leaf)));
        let centrality = exact(&graph, 3)?;
        assert_eq!(centrality[0], (k * (k - 1) / 2) as f64);
        assert!(centrality[1..].iter().all(|&c| c == 0.0));
    }
    Ok(())
}

#[test]
fn test_triangle() -> Result<()> {
    for orientation in [Orientation::Directed, Orientation::Undirected] {
        let graph = CsrGraph::from_arcs(
            orientation,
            [(0, 1), (1, 2), (2, 0), (1, 0), (2, 1), (0, 2)],
        );
        assert_eq!(&*exact(&graph, 2)?, &[0.0, 0.0, 0.0]);
    }
    Ok(())
}

#[test]
fn test_path() -> Result<()> {
    let n = 10;
    let expected = (0..n).map(|i| (i * (n - 1 - i)) as f64).collect::<Vec<_>>();
    assert_eq!(&*exact(&path(n, Orientation::Undirected), 4)?, expected.as_slice());
    // In a directed path each pair is connected in one direction only
    assert_eq!(&*exact(&path(n, Orientation::Directed), 4)?, expected.as_slice());
    Ok(())
}

#[test]
fn test_diamond_chain() -> Result<()> {
    // 2^64 shortest paths from node 0 to the last node
    let arcs = (0..64).flat_map(|i| {
        let base = 3 * i;
        [(base, base + 1), (base, base + 2), (base + 1, base + 3), (base + 2, base + 3)]
    });
    for orientation in [Orientation::Directed, Orientation::Undirected] {
        let graph = CsrGraph::from_arcs(orientation, arcs.clone());
        assert_eq!(graph.num_nodes(), 193);
        let expected = reference(&graph, |_| true);
        for concurrency in [1, 2, 5] {
            assert_close(&exact(&graph, concurrency)?, &expected);
        }
    }
    Ok(())
}

#[test]
fn test_directed_cycle() -> Result<()> {
    // In a directed cycle of length n, the path from i to j goes through
    // (j - i - 1) mod n nodes, so each node lies on (n - 1)(n - 2) / 2 paths
    let n = 7;
    let graph = CsrGraph::from_arcs(Orientation::Directed, (0..n).map(|i| (i, (i + 1) % n)));
    let centrality = exact(&graph, 2)?;
    assert!(centrality
        .iter()
        .all(|&c| c == ((n - 1) * (n - 2) / 2) as f64));
    Ok(())
}

#[test]
fn test_disconnected() -> Result<()> {
    // A path on 0..5, a star on 5..9, and an isolated node
    let mut arcs = (1..5).map(|i| (i - 1, i)).collect::<Vec<_>>();
    arcs.extend((6..9).map(|leaf| (5, leaf)));
    let graph = CsrGraph::from_arcs_with_num_nodes(10, Orientation::Undirected, arcs);
    assert_eq!(
        &*exact(&graph, 3)?,
        &[0.0, 3.0, 4.0, 3.0, 0.0, 3.0, 0.0, 0.0, 0.0, 0.0]
    );
    Ok(())
}

#[test]
fn test_self_loops() -> Result<()> {
    for orientation in [Orientation::Directed, Orientation::Undirected] {
        let base = ErdosRenyi::new(50, 0.08, 3).arcs(orientation);
        let mut with_loops = base.clone();
        with_loops.extend([(0, 0), (7, 7), (7, 7), (42, 42)]);
        let without = exact(&CsrGraph::from_arcs_with_num_nodes(50, orientation, base), 2)?;
        let with = exact(&CsrGraph::from_arcs_with_num_nodes(50, orientation, with_loops), 2)?;
        assert_close(&with, &without);
    }
    Ok(())
}

#[test]
fn test_parallel_edges() -> Result<()> {
    // A square 0 - 1 - 2 - 3 - 0
    let square = [(0, 1), (1, 2), (2, 3), (3, 0)];
    let graph = CsrGraph::from_arcs(Orientation::Undirected, square);
    assert_eq!(&*exact(&graph, 2)?, &[0.5, 0.5, 0.5, 0.5]);

    // Doubling 0 - 1 doubles the paths using it
    let graph = CsrGraph::from_arcs(Orientation::Undirected, square.into_iter().chain([(0, 1)]));
    let centrality = exact(&graph, 2)?;
    assert_close(&centrality, &[2.0 / 3.0, 2.0 / 3.0, 1.0 / 3.0, 1.0 / 3.0]);
    assert_close(&centrality, &reference(&graph, |_| true));

    // Parallel edges do not change the star and path values
    let star = CsrGraph::from_arcs(
        Orientation::Undirected,
        [(0, 1), (0, 1), (0, 2), (0, 3), (0, 3), (0, 3)],
    );
    assert_close(&exact(&star, 2)?, &[3.0, 0.0, 0.0, 0.0]);
    let path = CsrGraph::from_arcs(Orientation::Undirected, [(0, 1), (1, 2), (1, 2), (2, 3)]);
    assert_close(&exact(&path, 2)?, &[0.0, 2.0, 2.0, 0.0]);
    Ok(())
}

#[test]
fn test_concurrency_independence() -> Result<()> {
    for orientation in [Orientation::Directed, Orientation::Undirected] {
        let graph = ErdosRenyi::new(200, 0.02, 0).to_csr(orientation);
        let expected = reference(&graph, |_| true);
        let sequential = exact(&graph, 1)?;
        assert_close(&sequential, &expected);
        for concurrency in [2, 4, 8] {
            assert_close(&exact(&graph, concurrency)?, &sequential);
        }
    }
    Ok(())
}

#[test]
fn test_more_threads_than_nodes() -> Result<()> {
    let graph = path(3, Orientation::Undirected);
    assert_eq!(&*exact(&graph, 16)?, &[0.0, 1.0, 0.0]);
    Ok(())
}

#[test]
fn test_explicit_sources() -> Result<()> {
    let graph = ErdosRenyi::new(100, 0.05, 1).to_csr(Orientation::Directed);
    let sources = [3, 14, 15, 92, 65];
    let centrality =
        BetweennessCentrality::new(&graph, ExplicitSelection::new(sources), 4)?.compute()?;
    assert_close(&centrality, &reference(&graph, |s| sources.contains(&s)));

    // Contributions of disjoint sets of sources add up
    let others = (0..100).filter(|s| !sources.contains(s)).collect::<Vec<_>>();
    let rest =
        BetweennessCentrality::new(&graph, ExplicitSelection::new(others), 4)?.compute()?;
    let total = centrality
        .iter()
        .zip(rest.iter())
        .map(|(a, b)| a + b)
        .collect::<Vec<_>>();
    assert_close(&total, &exact(&graph, 4)?);
    Ok(())
}

#[test]
fn test_random_sources() -> Result<()> {
    let graph = ErdosRenyi::new(150, 0.03, 2).to_csr(Orientation::Undirected);
    let mut strategy = RandomSelection::new(0.2, 7)?;
    strategy.init(&graph, 1)?;
    let expected = reference(&graph, |s| strategy.select(s));
    for concurrency in [1, 3] {
        let centrality =
            BetweennessCentrality::new(&graph, RandomSelection::new(0.2, 7)?, concurrency)?
                .compute()?;
        assert_close(&centrality, &expected);
    }
    Ok(())
}

#[test]
fn test_no_sources() -> Result<()> {
    let graph = path(5, Orientation::Undirected);
    let centrality =
        BetweennessCentrality::new(&graph, RandomSelection::new(0.0, 0)?, 2)?.compute()?;
    assert!(centrality.iter().all(|&c| c == 0.0));
    Ok(())
}

#[test]
fn test_progress() -> Result<()> {
    let graph = ErdosRenyi::new(100, 0.05, 4).to_csr(Orientation::Directed);
    let sources = [0, 10, 50, 99];
    let fractions = Arc::new(Mutex::new(vec![]));
    let mut betweenness = BetweennessCentrality::new(&graph, ExplicitSelection::new(sources), 3)?;
    let f = fractions.clone();
    betweenness.progress(move |fraction| f.lock().unwrap().push(fraction));
    betweenness.compute()?;

    let mut fractions = fractions.lock().unwrap().clone();
    fractions.sort_by(f64::total_cmp);
    let expected = sources.map(|s| s as f64 / 99.0);
    assert_close(&fractions, &expected);
    Ok(())
}

#[test]
fn test_cancellation() -> Result<()> {
    let graph = ErdosRenyi::new(300, 0.02, 5).to_csr(Orientation::Undirected);

    // Cleared before starting
    let running = Arc::new(AtomicBool::new(false));
    let mut betweenness = BetweennessCentrality::new(&graph, All::default(), 2)?;
    betweenness.running_flag(running);
    assert!(matches!(betweenness.compute(), Err(BetweennessError::Cancelled)));
    // The engine cannot be reused, even after a cancellation
    assert!(matches!(
        betweenness.compute(),
        Err(BetweennessError::AlreadyComputed)
    ));

    // Cleared while running
    let running = Arc::new(AtomicBool::new(true));
    let visits = Arc::new(AtomicUsize::new(0));
    let mut betweenness = BetweennessCentrality::new(&graph, All::default(), 4)?;
    let (r, v) = (running.clone(), visits.clone());
    betweenness.running_flag(running).progress(move |_| {
        if v.fetch_add(1, Ordering::Relaxed) == 20 {
            r.store(false, Ordering::Relaxed);
        }
    });
    assert!(matches!(betweenness.compute(), Err(BetweennessError::Cancelled)));
    // Each thread completes at most the visit in progress
    assert!(visits.load(Ordering::Relaxed) <= 21 + 4);

    // A flag that stays set does not interfere
    let running = Arc::new(AtomicBool::new(true));
    let mut betweenness = BetweennessCentrality::new(&graph, All::default(), 4)?;
    betweenness.running_flag(running);
    assert_close(&betweenness.compute()?, &reference(&graph, |_| true));
    Ok(())
}

#[test]
fn test_with_logging() -> Result<()> {
    let _ = env_logger::builder().is_test(true).try_init();
    let graph = ErdosRenyi::new(100, 0.05, 6).to_csr(Orientation::Undirected);
    let mut cpl = concurrent_progress_logger![item_name = "source"];
    let centrality = BetweennessCentrality::new(&graph, All::default(), 2)?
        .compute_with_logging(&mut cpl)?;
    assert_close(&centrality, &reference(&graph, |_| true));
    Ok(())
}

#[test]
fn test_engine_over_boxed_graph() -> Result<()> {
    let graph: Box<CsrGraph> = Box::new(path(4, Orientation::Undirected));
    let mut betweenness = BetweennessCentrality::new(graph, All::default(), 2)?;
    assert_eq!(betweenness.num_nodes(), 4);
    assert_eq!(betweenness.expected_sources(), 4);
    assert_eq!(&*betweenness.compute()?, &[0.0, 2.0, 2.0, 0.0]);
    betweenness.release();
    Ok(())
}

#[cfg(feature = "slow_tests")]
#[test]
fn test_large_random() -> Result<()> {
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    let mut rng = SmallRng::seed_from_u64(0);
    for _ in 0..5 {
        let n = rng.random_range(500..2000);
        let p = 4.0 / n as f64;
        let seed = rng.random();
        for orientation in [Orientation::Directed, Orientation::Undirected] {
            let graph = ErdosRenyi::new(n, p, seed).to_csr(orientation);
            let expected = reference(&graph, |_| true);
            for concurrency in [1, 3, 8] {
                assert_close(&exact(&graph, concurrency)?, &expected);
            }
        }
    }
    Ok(())
}
