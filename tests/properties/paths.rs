//! Property-based tests for pipeline path resolution
//!
//! Every managed location must resolve under the workspace root, resolution
//! must depend only on the configuration, and any layout the pipeline accepts
//! must keep cleanup away from the input and the output.

use itempack::{PipelineConfig, PipelinePaths, TargetPlatform};
use proptest::prelude::*;
use std::path::Path;

/// Plain file names as users write them
fn file_name_strategy() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-zA-Z0-9_-]{1,12}(\\.[a-z]{1,4})?").unwrap()
}

/// Plain output directories
fn output_dir_strategy() -> impl Strategy<Value = String> {
    proptest::string::string_regex("(out|dist|build)[a-z0-9]{0,6}").unwrap()
}

/// Output directories including the root and the managed areas
fn any_output_dir_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        output_dir_strategy(),
        Just(".".to_string()),
        Just("Assets".to_string()),
        Just("TempBuild".to_string()),
        Just("TempBuild/nested".to_string()),
    ]
}

/// Output and input names that sometimes collide with managed names
fn colliding_name_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        file_name_strategy(),
        Just("model.fbx".to_string()),
        Just("TempZepetoItem.prefab".to_string()),
        Just("zepeto_bundle".to_string()),
    ]
}

fn platform_strategy() -> impl Strategy<Value = TargetPlatform> {
    prop_oneof![
        Just(TargetPlatform::StandaloneLinux64),
        Just(TargetPlatform::StandaloneWindows64),
        Just(TargetPlatform::Android),
        Just(TargetPlatform::Ios),
        Just(TargetPlatform::WebGl),
    ]
}

fn config_strategy() -> impl Strategy<Value = PipelineConfig> {
    (
        file_name_strategy(),
        output_dir_strategy(),
        file_name_strategy(),
        file_name_strategy(),
        platform_strategy(),
    )
        .prop_map(|(input, output_dir, output_file, bundle, platform)| {
            PipelineConfig::new("/work")
                .with_input(input)
                .with_output_dir(output_dir)
                .with_output_file(output_file)
                .with_bundle_name(bundle)
                .with_platform(platform)
        })
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 128, ..ProptestConfig::default() })]

    #[test]
    fn prop_paths_stay_under_root(config in config_strategy()) {
        let paths = PipelinePaths::resolve(&config);
        let root = Path::new("/work");

        prop_assert!(paths.source_file.starts_with(root));
        prop_assert!(paths.staged_asset_abs().starts_with(root));
        prop_assert!(paths.container_abs().starts_with(root));
        prop_assert!(paths.temp_build_dir.starts_with(root));
        prop_assert!(paths.generated_bundle.starts_with(&paths.temp_build_dir));
        prop_assert!(paths.final_output.starts_with(&paths.output_dir));
    }

    #[test]
    fn prop_resolution_is_deterministic(config in config_strategy()) {
        let first = PipelinePaths::resolve(&config);
        let second = PipelinePaths::resolve(&config.clone());

        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_staged_asset_keeps_input_name(config in config_strategy()) {
        let paths = PipelinePaths::resolve(&config);

        prop_assert_eq!(
            paths.staged_asset.file_name().and_then(|n| n.to_str()),
            Some(config.input_file_name())
        );
        prop_assert_eq!(
            paths.source_file.file_name().and_then(|n| n.to_str()),
            Some(config.input_file_name())
        );
    }

    #[test]
    fn prop_plain_layouts_are_accepted(config in config_strategy()) {
        let paths = PipelinePaths::resolve(&config);

        prop_assert_eq!(paths.check_layout(), Ok(()));
    }

    #[test]
    fn prop_accepted_layouts_keep_cleanup_off_io(
        input in colliding_name_strategy(),
        output_dir in any_output_dir_strategy(),
        output_file in colliding_name_strategy(),
    ) {
        let config = PipelineConfig::new("/work")
            .with_input(input)
            .with_output_dir(output_dir)
            .with_output_file(output_file);
        let paths = PipelinePaths::resolve(&config);

        if paths.check_layout().is_ok() {
            for managed in paths.managed_paths() {
                prop_assert_ne!(&managed, &paths.source_file);
                prop_assert_ne!(&managed, &paths.final_output);
            }
            prop_assert!(!paths.final_output.starts_with(&paths.temp_build_dir));
            prop_assert_ne!(&paths.final_output, &paths.source_file);
        }
    }
}
