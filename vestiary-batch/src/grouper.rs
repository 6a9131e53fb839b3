//! Pure grouping of uploaded images by identifier.

use std::collections::HashMap;
use vestiary_core::{Group, UploadedImage};

/// Partition a batch into groups keyed by identifier.
///
/// Group order follows the first appearance of each identifier; image order
/// within a group follows upload order. A blank identifier is a literal
/// empty-string key, never a fallback to the filename. No state survives
/// the call.
pub fn group_images(images: Vec<UploadedImage>) -> Vec<Group> {
    let mut groups: Vec<Group> = Vec::new();
    let mut index_by_id: HashMap<String, usize> = HashMap::new();

    for image in images {
        match index_by_id.get(&image.group_id) {
            Some(&at) => groups[at].images.push(image),
            None => {
                index_by_id.insert(image.group_id.clone(), groups.len());
                groups.push(Group { id: image.group_id.clone(), images: vec![image] });
            }
        }
    }

    groups
}
