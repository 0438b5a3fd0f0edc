use std::collections::VecDeque;

use log::debug;
use nalgebra::Point2;
use plate_locate_core::{Blob, GrayImageView};

/// Offsets of the 8-neighborhood.
const NEIGHBORS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Extract 8-connected foreground components from a binary image.
///
/// Scans in row-major order and grows each unvisited 255-pixel into a blob
/// with a breadth-first traversal; the visited grid lives for this call
/// only. A component survives only when it has strictly more than
/// `min_blob_size` pixels. Blobs come back in discovery order, not sorted.
pub fn extract_regions(binary: &GrayImageView<'_>, min_blob_size: usize) -> Vec<Blob> {
    let mut visited = vec![false; binary.width * binary.height];
    let mut blobs = Vec::new();
    let mut queue: VecDeque<Point2<i32>> = VecDeque::new();

    for y in 0..binary.height {
        for x in 0..binary.width {
            let idx = y * binary.width + x;
            if binary.data[idx] != 255 || visited[idx] {
                continue;
            }

            let mut blob = Blob::new();
            visited[idx] = true;
            queue.push_back(Point2::new(x as i32, y as i32));

            while let Some(p) = queue.pop_front() {
                blob.pixels.push(p);

                for (dx, dy) in NEIGHBORS {
                    let nx = p.x + dx;
                    let ny = p.y + dy;
                    if nx < 0 || ny < 0 || nx >= binary.width as i32 || ny >= binary.height as i32
                    {
                        continue;
                    }
                    let nidx = ny as usize * binary.width + nx as usize;
                    if binary.data[nidx] == 255 && !visited[nidx] {
                        visited[nidx] = true;
                        queue.push_back(Point2::new(nx, ny));
                    }
                }
            }

            if blob.len() > min_blob_size {
                blobs.push(blob);
            }
        }
    }

    debug!(
        "{} regions above the {min_blob_size}-pixel noise floor",
        blobs.len()
    );
    blobs
}
