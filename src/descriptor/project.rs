use super::{item_group, ItemGroupView};
use crate::{classify::Category, config::BuildConfig, guid::identifier_for, tree::ProjectModel};
use serde::Serialize;
use tera::Context;

pub const CONFIGURATIONS: &[&str] = &["Debug", "Release"];
pub const PLATFORMS: &[&str] = &["x64"];

/// Project-wide values that do not come from the source tree.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProjectSettings {
    /// Output file name; also seeds the project GUID.
    pub project_name: String,
    pub remote_root_dir: String,
    /// Directory of the Makefile below the remote root, `/`-separated.
    pub remote_project_dir: String,
    pub copy_sources: bool,
    pub include_search_path: String,
    pub remote_build_outputs: String,
    pub out_dir: String,
}

#[derive(Debug, Serialize)]
struct ConfigurationView<'a> {
    name: &'a str,
    platform: &'a str,
    use_debug_libraries: bool,
    build: String,
    rebuild: String,
    clean: String,
}

/// Command lines are embedded verbatim apart from `&&`, which the IDE expects escaped.
fn escape_command(command: &str) -> String {
    command.replace("&&", "&amp;&amp;")
}

fn configurations(config: &BuildConfig) -> Vec<ConfigurationView<'static>> {
    let mut views = Vec::new();

    for platform in PLATFORMS {
        for name in CONFIGURATIONS {
            let commands = config.commands_for(name);

            views.push(ConfigurationView {
                name,
                platform,
                use_debug_libraries: name.to_lowercase().contains("debug"),
                build: escape_command(&commands.remote_build_command_line),
                rebuild: escape_command(&commands.remote_rebuild_command_line),
                clean: escape_command(&commands.remote_clean_command_line),
            });
        }
    }

    views
}

pub(super) fn make_context(
    model: &ProjectModel,
    settings: &ProjectSettings,
    config: &BuildConfig,
) -> Context {
    // The build driver lists resources first, then sources, then headers.
    let groups: Vec<ItemGroupView> = [Category::Resource, Category::Source, Category::Header]
        .into_iter()
        .map(|category| item_group(model, category))
        .collect();

    let mut context = Context::new();
    context.insert("project_guid", &identifier_for(&settings.project_name));
    context.insert("settings", settings);
    context.insert("configurations", &configurations(config));
    context.insert("groups", &groups);

    context
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        classify::Classifier, config::BuildCommands, descriptor::Descriptors, filter::PathFilter,
        tree::build_model,
    };
    use std::fs;

    fn commands(prefix: &str) -> BuildCommands {
        BuildCommands {
            remote_build_command_line: format!("{prefix} build"),
            remote_rebuild_command_line: format!("{prefix} clean && {prefix} build"),
            remote_clean_command_line: format!("{prefix} clean"),
        }
    }

    fn config() -> BuildConfig {
        BuildConfig {
            debug: commands("make DEBUG=1"),
            release: commands("make"),
        }
    }

    fn settings() -> ProjectSettings {
        ProjectSettings {
            project_name: "demo.vcxproj".into(),
            remote_root_dir: "/home/dev/src".into(),
            remote_project_dir: "driver/net".into(),
            ..Default::default()
        }
    }

    fn render(root: &std::path::Path, settings: &ProjectSettings) -> String {
        let model = build_model(root, &PathFilter::default(), &Classifier::default()).unwrap();

        Descriptors::new()
            .unwrap()
            .render_project(&model, settings, &config())
            .unwrap()
    }

    #[test]
    fn escape_only_touches_double_ampersand() {
        assert_eq!(
            escape_command("cd x && make <all> & echo"),
            "cd x &amp;&amp; make <all> & echo"
        );
    }

    #[test]
    fn lists_files_flat_by_category() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("Makefile"), "").unwrap();
        fs::create_dir_all(dir.path().join("src/sub")).unwrap();
        fs::write(dir.path().join("src/foo.cpp"), "").unwrap();
        fs::write(dir.path().join("src/sub/bar.h"), "").unwrap();

        let rendered = render(dir.path(), &settings());

        let none = rendered.find(r#"<None Include=".\Makefile" />"#).unwrap();
        let compile = rendered
            .find(r#"<ClCompile Include=".\src\foo.cpp" />"#)
            .unwrap();
        let include = rendered
            .find(r#"<ClInclude Include=".\src\sub\bar.h" />"#)
            .unwrap();

        assert!(none < compile && compile < include);
        assert!(!rendered.contains("<Filter>"));
    }

    #[test]
    fn writes_configuration_blocks() {
        let dir = tempfile::tempdir().unwrap();

        let rendered = render(dir.path(), &settings());

        assert!(rendered.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<Project DefaultTargets=\"Build\""));
        assert!(rendered.contains(&format!(
            "<ProjectGuid>{}</ProjectGuid>",
            identifier_for("demo.vcxproj")
        )));
        assert!(rendered.contains(r#"<ProjectConfiguration Include="Debug|x64">"#));
        assert!(rendered.contains(r#"<ProjectConfiguration Include="Release|x64">"#));
        assert!(rendered.contains("<UseDebugLibraries>true</UseDebugLibraries>"));
        assert!(rendered.contains("<UseDebugLibraries>false</UseDebugLibraries>"));
        assert!(rendered.contains("<RemoteProjectRelDir>driver/net</RemoteProjectRelDir>"));
        assert!(rendered.contains("<RemoteRootDir>/home/dev/src</RemoteRootDir>"));
        assert!(rendered.contains(
            "<RemoteReBuildCommandLine>make DEBUG=1 clean &amp;&amp; make DEBUG=1 build</RemoteReBuildCommandLine>"
        ));
        assert!(rendered.contains("<RemoteBuildCommandLine>make build</RemoteBuildCommandLine>"));
        assert!(rendered.contains("<LocalRemoteCopySources>false</LocalRemoteCopySources>"));
        assert!(rendered.trim_end().ends_with("</Project>"));
    }

    #[test]
    fn optional_properties_only_when_set() {
        let dir = tempfile::tempdir().unwrap();

        let bare = render(dir.path(), &settings());
        assert!(!bare.contains("NMakeIncludeSearchPath"));
        assert!(!bare.contains("RemoteBuildOutputs"));
        assert!(!bare.contains("<OutDir>"));

        let full = render(
            dir.path(),
            &ProjectSettings {
                copy_sources: true,
                include_search_path: "/usr/include".into(),
                remote_build_outputs: "out/app".into(),
                out_dir: r"$(SolutionDir)bin\".into(),
                ..settings()
            },
        );
        assert!(full.contains("<LocalRemoteCopySources>true</LocalRemoteCopySources>"));
        assert!(full.contains("<NMakeIncludeSearchPath>/usr/include</NMakeIncludeSearchPath>"));
        assert!(full.contains("<RemoteBuildOutputs>out/app</RemoteBuildOutputs>"));
        assert!(full.contains(r"<OutDir>$(SolutionDir)bin\</OutDir>"));
    }
}
