use std::collections::{HashMap, HashSet};

#[derive(Debug, Default, PartialEq)]
pub struct CycleReport {
    /// Each cycle in the order the search walked it.
    pub cycles: Vec<Vec<String>>,
    pub in_cycle: HashSet<String>,
}

#[derive(Clone, Copy, PartialEq)]
enum Mark {
    OnPath,
    Done,
}

/// Depth-first search over `(id, dependencies)` pairs, visiting roots in the
/// given order. Edges to ids outside the graph are ignored.
pub fn detect_cycles<'a, I>(graph: I) -> CycleReport
where
    I: IntoIterator<Item = (&'a str, &'a [String])>,
{
    let nodes: Vec<(&str, &[String])> = graph.into_iter().collect();
    let index: HashMap<&str, usize> = nodes
        .iter()
        .enumerate()
        .map(|(i, (id, _))| (*id, i))
        .collect();

    let mut marks: Vec<Option<Mark>> = vec![None; nodes.len()];
    let mut report = CycleReport::default();

    for root in 0..nodes.len() {
        if marks[root].is_some() {
            continue;
        }

        // (node, next edge to follow)
        let mut stack: Vec<(usize, usize)> = vec![(root, 0)];
        marks[root] = Some(Mark::OnPath);

        while let Some(frame) = stack.last_mut() {
            let (node, edge) = *frame;
            let deps = nodes[node].1;

            if edge == deps.len() {
                marks[node] = Some(Mark::Done);
                stack.pop();
                continue;
            }
            frame.1 += 1;

            let Some(&next) = index.get(deps[edge].as_str()) else {
                continue;
            };

            match marks[next] {
                None => {
                    marks[next] = Some(Mark::OnPath);
                    stack.push((next, 0));
                }
                Some(Mark::OnPath) => {
                    let start = stack
                        .iter()
                        .position(|(n, _)| *n == next)
                        .unwrap_or(0);
                    let cycle: Vec<String> = stack[start..]
                        .iter()
                        .map(|(n, _)| nodes[*n].0.to_string())
                        .collect();
                    report.in_cycle.extend(cycle.iter().cloned());
                    report.cycles.push(cycle);
                }
                Some(Mark::Done) => {}
            }
        }
    }

    report
}
