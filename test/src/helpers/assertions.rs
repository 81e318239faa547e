/// Assert that `$path` (names separated by `/`) exists below `$from`
#[macro_export]
macro_rules! assert_node_at {
    ($scene:expr, $from:expr, $path:expr) => {
        assert!(
            $scene.find($from, $path).is_some(),
            "expected a node at '{}', tree is:\n{}",
            $path,
            $scene.outline($from)
        );
    };
}

/// Assert that nothing is attached at `$path` below `$from`
#[macro_export]
macro_rules! assert_no_node_at {
    ($scene:expr, $from:expr, $path:expr) => {
        assert!(
            $scene.find($from, $path).is_none(),
            "expected no node at '{}', tree is:\n{}",
            $path,
            $scene.outline($from)
        );
    };
}
