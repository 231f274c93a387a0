//! A tiny discrete Bayesian network over binary variables, with
//! maximum-likelihood parameter learning and exact inference by enumeration.

/// Upper bound for exact inference, which enumerates all 2^n states.
const MAX_NODES: usize = 16;

#[derive(Debug, Clone)]
pub struct Node {
    pub name: String,
    pub parents: Vec<usize>,
    /// `P(node = 1 | parents)`, indexed by the parent configuration (bit k
    /// holds the state of `parents[k]`).
    cpt: Vec<f64>,
}

impl Node {
    pub(crate) fn new(name: &str, parents: Vec<usize>) -> Self {
        let num_configs = 1 << parents.len();
        Self {
            name: name.to_owned(),
            parents,
            cpt: vec![0.5; num_configs],
        }
    }

    fn config(&self, states: &[bool]) -> usize {
        self.parents
            .iter()
            .enumerate()
            .filter(|(_, p)| states[**p])
            .fold(0, |acc, (k, _)| acc | (1 << k))
    }

    fn prob(&self, own_state: bool, states: &[bool]) -> f64 {
        let p1 = self.cpt[self.config(states)];
        if own_state {
            p1
        } else {
            1.0 - p1
        }
    }

    /// `P(node = 1)` for every parent configuration.
    pub fn cpt(&self) -> &[f64] {
        &self.cpt
    }
}

/// A fully specified sample together with how often it was observed.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub states: Vec<bool>,
    pub count: u64,
}

#[derive(Debug, Clone)]
pub struct BayesNet {
    pub(crate) nodes: Vec<Node>,
}

impl BayesNet {
    /// Build a network from node names and `(parent, child)` edges. All
    /// conditional probabilities start out uniform.
    pub fn new(names: &[&str], edges: &[(&str, &str)]) -> Result<Self, String> {
        if names.len() > MAX_NODES {
            return Err(format!(
                "{} nodes are too many for exact inference (at most {MAX_NODES})",
                names.len()
            ));
        }
        let index = |name: &str| {
            names
                .iter()
                .position(|n| *n == name)
                .ok_or_else(|| format!("edge refers to unknown node '{name}'"))
        };
        let mut parents = vec![Vec::new(); names.len()];
        for (parent, child) in edges {
            let (p, c) = (index(*parent)?, index(*child)?);
            if !parents[c].contains(&p) {
                parents[c].push(p);
            }
        }
        let nodes = names
            .iter()
            .zip(parents)
            .map(|(name, parents)| Node::new(name, parents))
            .collect();
        let net = Self { nodes };
        net.check_acyclic()?;
        Ok(net)
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Maximum-likelihood estimate of all conditional probability tables.
    ///
    /// Parent configurations that never occur in `observations` get a uniform
    /// distribution. Observations of the wrong size are ignored.
    pub fn fit(&mut self, observations: &[Observation]) {
        let num_nodes = self.nodes.len();
        let valid: Vec<_> = observations
            .iter()
            .filter(|obs| {
                let ok = obs.states.len() == num_nodes;
                if !ok {
                    log::warn!(
                        "ignoring observation with {} states in a network of {} nodes",
                        obs.states.len(),
                        num_nodes
                    );
                }
                ok
            })
            .collect();

        for (idx, node) in self.nodes.iter_mut().enumerate() {
            // counts[config] = (#node = 0, #node = 1)
            let mut counts = vec![(0u64, 0u64); node.cpt.len()];
            for obs in valid.iter() {
                let (n0, n1) = &mut counts[node.config(&obs.states)];
                if obs.states[idx] {
                    *n1 += obs.count;
                } else {
                    *n0 += obs.count;
                }
            }
            for (p1, (n0, n1)) in node.cpt.iter_mut().zip(counts) {
                *p1 = match n0 + n1 {
                    0 => 0.5,
                    total => n1 as f64 / total as f64,
                };
            }
        }
    }

    /// `P(target = 1 | evidence)`. Returns `None` if the evidence has
    /// probability zero under the current parameters.
    pub fn query(&self, target: usize, evidence: &[(usize, bool)]) -> Option<f64> {
        let num_nodes = self.nodes.len();
        if target >= num_nodes || evidence.iter().any(|(i, _)| *i >= num_nodes) {
            return None;
        }

        let mut states = vec![false; num_nodes];
        let (mut p_target, mut p_evidence) = (0.0, 0.0);
        for bits in 0usize..(1 << num_nodes) {
            for (i, state) in states.iter_mut().enumerate() {
                *state = bits & (1 << i) != 0;
            }
            if evidence.iter().any(|(i, val)| states[*i] != *val) {
                continue;
            }
            let p = self.joint(&states);
            p_evidence += p;
            if states[target] {
                p_target += p;
            }
        }

        if p_evidence > 0.0 {
            Some(p_target / p_evidence)
        } else {
            None
        }
    }

    /// Probability of one full assignment of states.
    pub fn joint(&self, states: &[bool]) -> f64 {
        self.nodes
            .iter()
            .zip(states)
            .map(|(node, &state)| node.prob(state, states))
            .product()
    }

    fn check_acyclic(&self) -> Result<(), String> {
        // Kahn's algorithm: repeatedly remove nodes without remaining parents.
        let mut remaining: Vec<usize> = self.nodes.iter().map(|n| n.parents.len()).collect();
        let mut ready: Vec<usize> = (0..self.nodes.len())
            .filter(|i| remaining[*i] == 0)
            .collect();
        let mut num_removed = 0;
        while let Some(i) = ready.pop() {
            num_removed += 1;
            for (j, node) in self.nodes.iter().enumerate() {
                if node.parents.contains(&i) {
                    remaining[j] -= 1;
                    if remaining[j] == 0 {
                        ready.push(j);
                    }
                }
            }
        }
        if num_removed == self.nodes.len() {
            Ok(())
        } else {
            Err("the network contains a cycle".to_string())
        }
    }
}
