use quick_xml::events::Event;
use quick_xml::Reader;
use std::fs;
use std::path::PathBuf;

use super::LicenseResolver;
use crate::dependency::{ArtifactCoordinate, Scope};
use crate::error::{AuditError, Result};

/// Parent chains deeper than this are treated as broken metadata
const MAX_PARENT_DEPTH: usize = 16;

/// License-relevant part of a POM
#[derive(Debug, Default, PartialEq)]
pub struct PomModel {
    pub licenses: Vec<String>,
    pub parent: Option<ArtifactCoordinate>,
}

#[derive(Default)]
struct ParentRef {
    group: String,
    artifact: String,
    version: String,
}

/// Parse `project/licenses/license/name` and `project/parent` out of a POM
pub fn parse_pom(content: &str) -> std::result::Result<PomModel, quick_xml::Error> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut path: Vec<String> = Vec::new();
    let mut model = PomModel::default();
    let mut license_name: Option<String> = None;
    let mut parent: Option<ParentRef> = None;

    loop {
        match reader.read_event()? {
            Event::Start(element) => {
                let name = String::from_utf8_lossy(element.local_name().as_ref()).into_owned();
                path.push(name);
                match path_of(&path).as_slice() {
                    ["project", "licenses", "license", "name"] => license_name = Some(String::new()),
                    ["project", "parent"] => parent = Some(ParentRef::default()),
                    _ => {}
                }
            }
            Event::End(_) => {
                if path_of(&path).as_slice() == ["project", "licenses", "license", "name"] {
                    if let Some(name) = license_name.take() {
                        let name = name.trim();
                        if !name.is_empty() {
                            model.licenses.push(name.to_string());
                        }
                    }
                }
                path.pop();
            }
            Event::Text(text) => {
                let text = text.unescape()?;
                append_text(&path, &text, &mut license_name, &mut parent);
            }
            Event::CData(data) => {
                let text = String::from_utf8_lossy(&data).into_owned();
                append_text(&path, &text, &mut license_name, &mut parent);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    model.parent = parent
        .filter(|p| !p.group.is_empty() && !p.artifact.is_empty() && !p.version.is_empty())
        .map(|p| ArtifactCoordinate::new(p.group, p.artifact, p.version, Scope::Import));

    Ok(model)
}

fn path_of(path: &[String]) -> Vec<&str> {
    path.iter().map(String::as_str).collect()
}

fn append_text(
    path: &[String],
    text: &str,
    license_name: &mut Option<String>,
    parent: &mut Option<ParentRef>,
) {
    match path_of(path).as_slice() {
        ["project", "licenses", "license", "name"] => {
            if let Some(name) = license_name.as_mut() {
                name.push_str(text);
            }
        }
        ["project", "parent", field] => {
            if let Some(parent) = parent.as_mut() {
                match *field {
                    "groupId" => parent.group.push_str(text.trim()),
                    "artifactId" => parent.artifact.push_str(text.trim()),
                    "version" => parent.version.push_str(text.trim()),
                    _ => {}
                }
            }
        }
        _ => {}
    }
}

/// Resolves licenses from POM files of a local Maven-layout repository.
///
/// A POM without `<licenses>` inherits the licenses of its parent POM.
#[derive(Debug, Clone)]
pub struct PomRepository {
    root: PathBuf,
}

impl PomRepository {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    /// `<root>/<group as dirs>/<artifact>/<version>/<artifact>-<version>.pom`
    pub fn pom_path(&self, coordinate: &ArtifactCoordinate) -> PathBuf {
        let mut path = self.root.clone();
        for segment in coordinate.group.split('.') {
            path.push(segment);
        }
        path.push(&coordinate.artifact);
        path.push(&coordinate.version);
        path.push(format!("{}-{}.pom", coordinate.artifact, coordinate.version));
        path
    }

    fn load_model(&self, requested: &ArtifactCoordinate, pom: &ArtifactCoordinate) -> Result<PomModel> {
        let path = self.pom_path(pom);
        let resolution_error = |reason: String| AuditError::Resolution {
            coordinate: requested.label(),
            reason,
        };

        let content = fs::read_to_string(&path)
            .map_err(|e| resolution_error(format!("cannot read {}: {}", path.display(), e)))?;

        parse_pom(&content)
            .map_err(|e| resolution_error(format!("cannot parse {}: {}", path.display(), e)))
    }
}

impl LicenseResolver for PomRepository {
    fn resolve(&self, coordinate: &ArtifactCoordinate) -> Result<Vec<String>> {
        let mut model = self.load_model(coordinate, coordinate)?;
        let mut depth = 0;

        while model.licenses.is_empty() {
            let Some(parent) = model.parent.take() else {
                break;
            };

            depth += 1;
            if depth > MAX_PARENT_DEPTH {
                return Err(AuditError::Resolution {
                    coordinate: coordinate.label(),
                    reason: format!("parent chain deeper than {} POMs", MAX_PARENT_DEPTH),
                });
            }

            model = self.load_model(coordinate, &parent)?;
        }

        Ok(model.licenses)
    }
}
