use std::sync::Arc;

use crate::core::{bbox::Bbox, intersection::Intersection, ray::Ray};

use super::PrimitiveT;

pub struct BvhAccel<P: PrimitiveT> {
    nodes: Vec<BvhNode>,
    primitives: Vec<Arc<P>>,
}

struct BvhNode {
    bbox: Bbox,
    start: usize,
    end: usize,
    // index of the right child, the left one always follows its parent
    right: Option<usize>,
}

impl<P: PrimitiveT> BvhAccel<P> {
    pub fn new(mut primitives: Vec<Arc<P>>, max_leaf_size: usize) -> Self {
        let mut nodes = vec![];
        if !primitives.is_empty() {
            let len = primitives.len();
            Self::build(&mut nodes, &mut primitives, 0, len, max_leaf_size.max(1));
        }
        Self { nodes, primitives }
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    fn build(
        nodes: &mut Vec<BvhNode>,
        primitives: &mut [Arc<P>],
        start: usize,
        end: usize,
        max_leaf_size: usize,
    ) -> usize {
        let bbox = primitives[start..end]
            .iter()
            .fold(Bbox::empty(), |acc, prim| acc.merge(prim.bbox()));
        let index = nodes.len();
        nodes.push(BvhNode {
            bbox,
            start,
            end,
            right: None,
        });
        if end - start <= max_leaf_size {
            return index;
        }

        let centroid_box = primitives[start..end]
            .iter()
            .fold(Bbox::empty(), |acc, prim| acc.merge_point(prim.bbox().centroid()));
        let axis = centroid_box.largest_axis();
        primitives[start..end].sort_by(|a, b| {
            let ca = a.bbox().centroid()[axis];
            let cb = b.bbox().centroid()[axis];
            ca.partial_cmp(&cb).unwrap_or(std::cmp::Ordering::Equal)
        });

        let mid = start + (end - start) / 2;
        Self::build(nodes, primitives, start, mid, max_leaf_size);
        let right = Self::build(nodes, primitives, mid, end, max_leaf_size);
        nodes[index].right = Some(right);
        index
    }
}

impl<P: PrimitiveT> PrimitiveT for BvhAccel<P> {
    fn intersect_test(&self, ray: &Ray, t_max: f32) -> bool {
        if self.nodes.is_empty() {
            return false;
        }

        let mut stack = vec![0];
        while let Some(u) = stack.pop() {
            let node = &self.nodes[u];
            if !node.bbox.intersect_test(ray, t_max) {
                continue;
            }
            if let Some(right) = node.right {
                stack.push(u + 1);
                stack.push(right);
            } else {
                for i in node.start..node.end {
                    if self.primitives[i].intersect_test(ray, t_max) {
                        return true;
                    }
                }
            }
        }
        false
    }

    fn intersect<'a>(&'a self, ray: &Ray, inter: &mut Intersection<'a>) -> bool {
        if self.nodes.is_empty() {
            return false;
        }

        let mut stack = vec![0];
        let mut result = false;
        while let Some(u) = stack.pop() {
            let node = &self.nodes[u];
            if !node.bbox.intersect_test(ray, inter.t) {
                continue;
            }
            if let Some(right) = node.right {
                stack.push(u + 1);
                stack.push(right);
            } else {
                for i in node.start..node.end {
                    result |= self.primitives[i].intersect(ray, inter);
                }
            }
        }
        result
    }

    fn bbox(&self) -> Bbox {
        self.nodes
            .first()
            .map_or_else(Bbox::empty, |root| root.bbox)
    }
}
