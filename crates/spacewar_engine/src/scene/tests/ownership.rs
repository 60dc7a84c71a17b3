//! Attach / detach / renderable ownership rules

use crate::foundation::math::Transform;
use crate::scene::{MaterialId, MeshId, NodeId, Renderable, SceneError, SceneGraph};

fn occurrences(graph: &SceneGraph, parent: NodeId, child: NodeId) -> usize {
    graph.children_of(parent).iter().filter(|&&c| c == child).count()
}

#[test]
fn attach_sets_back_link_and_appends_once() {
    let mut graph = SceneGraph::new();
    let parent = graph.create_node();
    let first = graph.create_node();
    let child = graph.create_node();

    graph.attach(parent, first).unwrap();
    graph.attach(parent, child).unwrap();

    assert_eq!(graph.parent_of(child), Some(parent));
    assert_eq!(occurrences(&graph, parent, child), 1);
    assert_eq!(graph.children_of(parent).last(), Some(&child));
    assert!(!graph.roots().contains(&child));
}

#[test]
fn detach_clears_back_link_and_second_detach_is_noop() {
    let mut graph = SceneGraph::new();
    let parent = graph.create_node();
    let child = graph.create_node();
    graph.attach(parent, child).unwrap();

    assert!(graph.detach(parent, child));
    assert_eq!(graph.parent_of(child), None);
    assert_eq!(occurrences(&graph, parent, child), 0);
    assert!(graph.contains(child));
    assert!(graph.roots().contains(&child));

    assert!(!graph.detach(parent, child));
    assert_eq!(graph.roots().iter().filter(|&&r| r == child).count(), 1);
}

#[test]
fn detach_from_wrong_parent_changes_nothing() {
    let mut graph = SceneGraph::new();
    let p1 = graph.create_node();
    let p2 = graph.create_node();
    let child = graph.create_node();
    graph.attach(p1, child).unwrap();

    assert!(!graph.detach(p2, child));
    assert_eq!(graph.parent_of(child), Some(p1));
    assert_eq!(graph.children_of(p1), &[child]);
}

#[test]
fn attaching_under_a_descendant_fails_and_leaves_tree_unchanged() {
    let mut graph = SceneGraph::new();
    let top = graph.create_node();
    let middle = graph.create_child(top, Transform::identity()).unwrap();
    let bottom = graph.create_child(middle, Transform::identity()).unwrap();

    let result = graph.attach(bottom, top);

    assert_eq!(
        result,
        Err(SceneError::CycleViolation {
            parent: bottom,
            child: top
        })
    );
    assert_eq!(graph.parent_of(top), None);
    assert_eq!(graph.children_of(top), &[middle]);
    assert_eq!(graph.children_of(middle), &[bottom]);
    assert!(graph.children_of(bottom).is_empty());
    assert_eq!(graph.roots(), &[top]);
}

#[test]
fn reparenting_leaves_node_under_exactly_one_parent() {
    let mut graph = SceneGraph::new();
    let p1 = graph.create_node();
    let p2 = graph.create_node();
    let child = graph.create_node();

    graph.attach(p1, child).unwrap();
    graph.attach(p2, child).unwrap();

    assert_eq!(occurrences(&graph, p1, child), 0);
    assert_eq!(occurrences(&graph, p2, child), 1);
    assert_eq!(graph.parent_of(child), Some(p2));
}

#[test]
fn set_renderable_twice_keeps_only_the_second() {
    let mut graph = SceneGraph::new();
    let node = graph.create_node();
    let first = Renderable::new("first", MeshId(1), MaterialId(1)).shared();
    let second = Renderable::new("second", MeshId(2), MaterialId(2)).shared();

    assert!(graph.set_renderable(node, first.clone()).unwrap().is_none());
    let replaced = graph.set_renderable(node, second).unwrap();

    assert_eq!(replaced.as_ref(), Some(&first));
    assert_eq!(graph.renderable(node).unwrap().label, "second");
}

#[test]
fn root_with_two_children_scenario() {
    let mut graph = SceneGraph::new();
    let r = graph.create_node();
    let a = graph.create_node();
    let b = graph.create_node();

    graph.attach(r, a).unwrap();
    graph.attach(r, b).unwrap();
    assert_eq!(graph.children_of(r), &[a, b]);

    assert!(graph.detach(r, a));
    assert_eq!(graph.children_of(r), &[b]);

    graph.attach(b, a).unwrap();
    assert_eq!(
        graph.attach(a, b),
        Err(SceneError::CycleViolation { parent: a, child: b })
    );
    assert_eq!(graph.parent_of(a), Some(b));
    assert_eq!(graph.parent_of(b), Some(r));
}

#[test]
fn every_back_link_matches_an_owning_edge() {
    let mut graph = SceneGraph::new();
    let nodes: Vec<NodeId> = (0..6).map(|_| graph.create_node()).collect();

    graph.attach(nodes[0], nodes[1]).unwrap();
    graph.attach(nodes[1], nodes[2]).unwrap();
    graph.attach(nodes[0], nodes[3]).unwrap();
    graph.attach(nodes[3], nodes[1]).unwrap();
    let _ = graph.attach(nodes[2], nodes[0]);
    graph.attach(nodes[4], nodes[5]).unwrap();
    graph.detach(nodes[4], nodes[5]);
    graph.attach(nodes[2], nodes[4]).unwrap();

    for &id in &nodes {
        match graph.parent_of(id) {
            Some(parent) => {
                assert_eq!(occurrences(&graph, parent, id), 1);
                assert!(!graph.roots().contains(&id));
            }
            None => assert!(graph.roots().contains(&id)),
        }
        for &child in graph.children_of(id) {
            assert_eq!(graph.parent_of(child), Some(id));
        }
        assert!(!graph.is_ancestor(id, id));
    }
    assert_eq!(graph.iter_depth_first().count(), nodes.len());
}
