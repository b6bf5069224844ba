// Copyright 2025 Eric Jingryd (tidynest@proton.me)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::path::{Path, PathBuf};

use crate::settings::icon::{filter_icon_names, icon_source, IconSource};

#[test]
fn test_bare_value_is_theme_icon_name() {
    assert_eq!(
        icon_source("folder-music", None),
        IconSource::Name("folder-music".to_string())
    );
    assert_eq!(
        icon_source("  user-home  ", Some("folder")),
        IconSource::Name("user-home".to_string())
    );
}

#[test]
fn test_paths_and_file_uris_preview_as_files() {
    assert_eq!(
        icon_source("/usr/share/pixmaps/logo.png", None),
        IconSource::File(PathBuf::from("/usr/share/pixmaps/logo.png"))
    );
    assert_eq!(
        icon_source("file:///usr/share/pixmaps/logo.png", None),
        IconSource::File(PathBuf::from("/usr/share/pixmaps/logo.png"))
    );
    assert_eq!(
        icon_source("icons/logo.svg", None),
        IconSource::File(PathBuf::from("icons/logo.svg"))
    );
}

#[test]
fn test_home_relative_path_is_expanded() {
    let IconSource::File(path) = icon_source("~/icons/logo.png", None) else {
        panic!("Expected a file");
    };

    assert!(!path.starts_with("~"));
    assert!(path.ends_with(Path::new("icons/logo.png")));
}

#[test]
fn test_empty_value_previews_default_icon() {
    assert_eq!(
        icon_source("", Some("image-missing")),
        IconSource::Name("image-missing".to_string())
    );
    assert_eq!(icon_source("", None), IconSource::Empty);
    assert_eq!(icon_source(" ", Some("")), IconSource::Empty);
}

#[test]
fn test_icon_names_filtered_case_insensitively() {
    let names = ["folder-music", "Folder-Remote", "user-home", "folder-music", "audio-x-generic"];

    assert_eq!(
        filter_icon_names(&names, "FOLDER", 10),
        vec!["Folder-Remote".to_string(), "folder-music".to_string()]
    );
    assert_eq!(filter_icon_names(&names, "", 10).len(), 4, "Duplicates dropped");
}

#[test]
fn test_icon_names_capped_at_limit() {
    let names: Vec<String> = (0..50).map(|i| format!("icon-{:02}", i)).collect();

    let shown = filter_icon_names(&names, "icon", 5);

    assert_eq!(shown, vec!["icon-00", "icon-01", "icon-02", "icon-03", "icon-04"]);
}
