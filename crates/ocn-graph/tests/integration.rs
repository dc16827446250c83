//! Integration tests for ocn-graph.

use ocn_core::{NodeId, PortNumber};
use ocn_graph::{GraphError, LinkDirection, Network, Path};

/// Link `a` and `b` in both directions with cost 1.
fn connect(net: &mut Network<(usize, usize)>, a: NodeId, b: NodeId) {
    net.add_link(a, b).unwrap();
    net.add_link(b, a).unwrap();
}

#[test]
fn three_node_detour() {
    let mut net = Network::new();
    let a = net.add_node("A", ()).unwrap();
    let b = net.add_node("B", ()).unwrap();
    let c = net.add_node("C", ()).unwrap();

    net.add_direct_edge(a, b, 5).unwrap();
    net.add_direct_edge(b, c, 3).unwrap();
    net.add_direct_edge(a, c, 100).unwrap();

    let path = net.search(a, c).unwrap().unwrap();
    assert_eq!(path.cost(), 8);
    assert!(path.passes_through(b));

    // The expensive edge is still a physical link on its own port.
    assert_eq!(net.outgoing_port(a, c).unwrap(), PortNumber(1));
}

#[test]
fn later_cheaper_edge_wins() {
    let mut net = Network::new();
    let a = net.add_node("A", ()).unwrap();
    let b = net.add_node("B", ()).unwrap();

    net.add_direct_edge(a, b, 10).unwrap();
    assert_eq!(net.search(a, b).unwrap().map(Path::cost), Some(10));

    net.add_direct_edge(a, b, 3).unwrap();
    assert_eq!(net.search(a, b).unwrap().map(Path::cost), Some(3));
    assert_eq!(net.outgoing_port(a, b).unwrap(), PortNumber(0));
    assert_eq!(net.incoming_port(b, a).unwrap(), PortNumber(0));
}

#[test]
fn two_by_two_mesh_corners() {
    let mut net = Network::new();
    let mut grid = [[None; 2]; 2];
    for (x, column) in grid.iter_mut().enumerate() {
        for (y, slot) in column.iter_mut().enumerate() {
            *slot = Some(net.add_node(format!("({x},{y})"), (x, y)).unwrap());
        }
    }
    let at = |x: usize, y: usize| grid[x][y].unwrap();

    connect(&mut net, at(0, 0), at(1, 0));
    connect(&mut net, at(0, 0), at(0, 1));
    connect(&mut net, at(1, 0), at(1, 1));
    connect(&mut net, at(0, 1), at(1, 1));

    let corner = net.search(at(0, 0), at(1, 1)).unwrap().unwrap();
    assert_eq!(corner.cost(), 2);
    assert_eq!(corner.steps().len(), 1);

    let back = net.search(at(1, 1), at(0, 0)).unwrap().unwrap();
    assert_eq!(back.cost(), 2);

    for node in net.nodes() {
        assert_eq!(node.outgoing_neighbors().len(), 2);
        assert_eq!(node.incoming_neighbors().len(), 2);
    }
    let ids: Vec<NodeId> = net.nodes().map(|n| n.id()).collect();
    for id in ids {
        assert_eq!(net.paths(id).unwrap().len(), 3);
    }
}

#[test]
fn out_of_order_build_converges() {
    // Query the tail before the chain is complete, then extend at the head.
    let mut net = Network::new();
    let ids: Vec<NodeId> = (0..5)
        .map(|i| net.add_node(format!("r{i}"), ()).unwrap())
        .collect();

    net.add_link(ids[3], ids[4]).unwrap();
    assert_eq!(net.paths(ids[3]).unwrap().len(), 1);
    net.add_link(ids[2], ids[3]).unwrap();
    assert_eq!(net.paths(ids[2]).unwrap().len(), 2);
    net.add_link(ids[0], ids[1]).unwrap();
    assert_eq!(net.paths(ids[0]).unwrap().len(), 1);
    net.add_link(ids[1], ids[2]).unwrap();

    let far = net.search(ids[0], ids[4]).unwrap().unwrap();
    assert_eq!(far.cost(), 4);
    assert_eq!(far.steps(), &ids[1..4]);
}

#[test]
fn shortcut_invalidates_upstream_tables() {
    let mut net = Network::new();
    let ids: Vec<NodeId> = (0..4)
        .map(|i| net.add_node(format!("r{i}"), ()).unwrap())
        .collect();

    net.add_direct_edge(ids[0], ids[1], 1).unwrap();
    net.add_direct_edge(ids[1], ids[2], 10).unwrap();
    net.add_direct_edge(ids[2], ids[3], 1).unwrap();
    assert_eq!(net.search(ids[0], ids[3]).unwrap().map(Path::cost), Some(12));

    net.add_direct_edge(ids[1], ids[3], 2).unwrap();
    assert_eq!(net.search(ids[0], ids[3]).unwrap().map(Path::cost), Some(3));
}

#[test]
fn duplicate_identity_fails() {
    let mut net = Network::new();
    net.add_node("router", ()).unwrap();
    let err = net.add_node("router", ()).unwrap_err();
    assert_eq!(
        err,
        GraphError::DuplicateName {
            name: "router".to_string()
        }
    );
    assert!(err.to_string().contains("already registered"));
}

#[test]
fn explicit_ports_round_trip() {
    let mut net = Network::new();
    let x = net.add_node("X", ()).unwrap();
    let y = net.add_node("Y", ()).unwrap();

    net.add_direct_edge_with_ports(x, PortNumber(0), y, PortNumber(1), 7)
        .unwrap();

    assert_eq!(net.outgoing_port(x, y).unwrap(), PortNumber(0));
    assert_eq!(net.incoming_port(y, x).unwrap(), PortNumber(1));
    assert_eq!(net.search(x, y).unwrap().map(Path::cost), Some(7));

    let link = &net.node(y).unwrap().incoming_neighbors()[0];
    assert_eq!(link.neighbor(LinkDirection::Incoming), x);
    assert!(link.path.is_direct());
}

#[test]
fn missing_incoming_port_is_an_error() {
    let mut net = Network::new();
    let x = net.add_node("X", ()).unwrap();
    let y = net.add_node("Y", ()).unwrap();
    net.add_link(x, y).unwrap();

    let err = net.incoming_port(x, y).unwrap_err();
    assert!(matches!(
        err,
        GraphError::PortNotFound {
            direction: LinkDirection::Incoming,
            ..
        }
    ));
}
