/// Whatever free-form nodes the host holds, a client that connects ends up
/// with the same names and positions.

use canopy_demo_scene::ArenaScene;
use canopy_shared::{SceneRef, Vector2};
use canopy_test::{node_2d_at, snapshot_library, PeerPair};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn snapshot_reproduces_positions(
        positions in prop::collection::vec((-1000i32..1000, -1000i32..1000), 0..6)
    ) {
        let mut host = ArenaScene::new("Root", snapshot_library());
        let root = host.root();
        for (index, (x, y)) in positions.iter().enumerate() {
            node_2d_at(&mut host, root, &format!("N{}", index), *x as f32, *y as f32);
        }

        let mut pair = PeerPair::new(host, ArenaScene::new("Root", snapshot_library()));
        pair.connect();

        let scene = &pair.client_scene;
        let client_root = scene.root();
        prop_assert_eq!(scene.children(client_root).len(), positions.len());
        for (index, (x, y)) in positions.iter().enumerate() {
            let node = scene.find(client_root, &format!("N{}", index)).unwrap();
            prop_assert_eq!(
                scene.node_2d(node).unwrap().position,
                Vector2::new(*x as f32, *y as f32)
            );
        }
    }
}
