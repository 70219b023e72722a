use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;
use tracing_subscriber::EnvFilter;

use polytwister::api::{
    all_specs, compute_section, get_spec, render_frames, FramePlan, Kind, Mesh, NormalizeParams,
    Normalizer, PolytwisterSpec, SectionParams,
};

mod provenance;

#[derive(Parser)]
#[command(name = "polytwister")]
#[command(about = "Cross-sections of polytwisters, one OBJ per w")]
struct Cmd {
    /// Section parameters as JSON, e.g. '{"resolution": 50}'
    #[arg(long, global = true)]
    params: Option<String>,

    /// Normalization parameters as JSON, e.g. '{"bisection_tol": 0.001}'
    #[arg(long, global = true)]
    normalize_params: Option<String>,

    /// Points per Hopf fiber (soft specs); overrides --params
    #[arg(long, global = true)]
    resolution: Option<usize>,

    /// Largest angle per cylinder facet in radians (hard specs); overrides --params
    #[arg(long, global = true)]
    angular_tol: Option<f64>,

    #[command(subcommand)]
    action: Action,
}

#[derive(Clone, Copy, ValueEnum)]
enum KindArg {
    Hard,
    Soft,
}

impl From<KindArg> for Kind {
    fn from(k: KindArg) -> Self {
        match k {
            KindArg::Hard => Kind::Hard,
            KindArg::Soft => Kind::Soft,
        }
    }
}

#[derive(Subcommand)]
enum Action {
    /// Print the canonical names of the catalog
    List {
        #[arg(long, value_enum)]
        kind: Option<KindArg>,
    },
    /// Print a spec as JSON
    Spec { name: String },
    /// Write the cross-section at one w as an OBJ file
    Section {
        name: String,
        #[arg(long, allow_hyphen_values = true)]
        w: f64,
        #[arg(long)]
        out: PathBuf,
        /// Scale the written section so its farthest vertex is at distance 1
        #[arg(long)]
        normalize: bool,
    },
    /// Print {scale, max_w} as JSON
    Normalize { name: String },
    /// Write a normalized frame sequence plus manifest.json
    Animate {
        name: String,
        #[arg(long, default_value_t = 100)]
        frames: usize,
        #[arg(long)]
        out_dir: PathBuf,
        /// Skip the max_w search and use this value
        #[arg(long)]
        max_w: Option<f64>,
    },
}

fn main() -> Result<()> {
    SubscriberBuilder::default()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
    let cmd = Cmd::parse();
    let section = section_params(&cmd)?;
    let normalize = normalize_params(&cmd)?;
    match cmd.action {
        Action::List { kind } => list(kind.map(Kind::from)),
        Action::Spec { name } => spec(&name),
        Action::Section {
            name,
            w,
            out,
            normalize: unit,
        } => section_cmd(&name, w, &out, unit, &section),
        Action::Normalize { name } => normalize_cmd(&name, &section, &normalize),
        Action::Animate {
            name,
            frames,
            out_dir,
            max_w,
        } => animate(&name, frames, &out_dir, max_w, &section, &normalize),
    }
}

fn section_params(cmd: &Cmd) -> Result<SectionParams> {
    let mut params: SectionParams = match &cmd.params {
        Some(json) => serde_json::from_str(json).context("parsing --params")?,
        None => SectionParams::default(),
    };
    if let Some(r) = cmd.resolution {
        params.resolution = r;
    }
    if let Some(a) = cmd.angular_tol {
        params.angular_tol = a;
    }
    Ok(params)
}

fn normalize_params(cmd: &Cmd) -> Result<NormalizeParams> {
    match &cmd.normalize_params {
        Some(json) => serde_json::from_str(json).context("parsing --normalize-params"),
        None => Ok(NormalizeParams::default()),
    }
}

fn lookup(name: &str) -> Result<PolytwisterSpec> {
    get_spec(name).with_context(|| format!("looking up `{name}`"))
}

fn list(kind: Option<Kind>) -> Result<()> {
    for spec in all_specs() {
        if kind.map_or(true, |k| spec.kind() == k) {
            println!("{}", spec.name());
        }
    }
    Ok(())
}

fn spec(name: &str) -> Result<()> {
    let spec = lookup(name)?;
    println!("{}", serde_json::to_string_pretty(&spec)?);
    Ok(())
}

fn section_mesh(
    spec: &PolytwisterSpec,
    w: f64,
    unit: bool,
    section: &SectionParams,
) -> Result<Mesh> {
    let mesh = compute_section(spec, w, section)?;
    Ok(if unit { mesh.normalized() } else { mesh })
}

fn section_cmd(name: &str, w: f64, out: &Path, unit: bool, section: &SectionParams) -> Result<()> {
    let spec = lookup(name)?;
    let mesh = section_mesh(&spec, w, unit, section)?;
    tracing::info!(name = spec.name(), w, unit, vertices = mesh.vertices.len(), "section");
    write_obj(out, &mesh)
}

fn normalize_cmd(name: &str, section: &SectionParams, normalize: &NormalizeParams) -> Result<()> {
    let spec = lookup(name)?;
    let result = Normalizer::with_params(section, normalize)?.normalize(&spec)?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

fn animate(
    name: &str,
    frames: usize,
    out_dir: &Path,
    max_w: Option<f64>,
    section: &SectionParams,
    normalize: &NormalizeParams,
) -> Result<()> {
    let spec = lookup(name)?;
    let normalizer = Normalizer::with_params(section, normalize)?;
    let (scale, max_w) = match max_w {
        Some(w) => {
            let d0 = normalizer.extent(&spec, 0.0)?;
            anyhow::ensure!(d0 > 0.0, "`{name}` is empty at w = 0");
            (1.0 / d0, w)
        }
        None => {
            let n = normalizer.normalize(&spec)?;
            (n.scale, n.max_w)
        }
    };
    tracing::info!(name = spec.name(), frames, scale, max_w, "animate");
    let plan = FramePlan::new(frames, max_w)?;
    let meshes = render_frames(normalizer.realizer(), &spec, &plan, scale)?;
    let file_names = write_frames(out_dir, &plan, &meshes)?;
    let manifest = provenance::Manifest::sections(
        spec.name(),
        max_w,
        scale,
        file_names,
        serde_json::json!({ "section": section, "normalize": normalize }),
    );
    let path = provenance::write_manifest(out_dir, &manifest)?;
    tracing::info!(manifest = %path.display(), "done");
    Ok(())
}

fn write_frames(dir: &Path, plan: &FramePlan, meshes: &[Mesh]) -> Result<Vec<String>> {
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    let names = plan.file_names("obj");
    for (name, mesh) in names.iter().zip(meshes) {
        write_obj(&dir.join(name), mesh)?;
    }
    Ok(names)
}

fn write_obj(path: &Path, mesh: &Mesh) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    mesh.write_obj(BufWriter::new(file))
        .with_context(|| format!("writing {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use polytwister::Vec3;
    use tempfile::tempdir;

    fn parse(args: &[&str]) -> Cmd {
        Cmd::try_parse_from(args).unwrap()
    }

    #[test]
    fn flags_override_json_params() {
        let cmd = parse(&[
            "polytwister",
            "--params",
            r#"{"resolution": 50, "angular_tol": 0.2}"#,
            "--resolution",
            "20",
            "normalize",
            "duospindle",
        ]);
        let p = section_params(&cmd).unwrap();
        assert_eq!(p.resolution, 20);
        assert_eq!(p.angular_tol, 0.2);
        assert!(matches!(cmd.action, Action::Normalize { .. }));
    }

    #[test]
    fn negative_w_parses() {
        let cmd = parse(&[
            "polytwister",
            "section",
            "tetratwister",
            "--w",
            "-0.5",
            "--out",
            "a.obj",
        ]);
        assert!(matches!(cmd.action, Action::Section { w, .. } if w == -0.5));
    }

    #[test]
    fn bad_params_json_is_an_error() {
        let cmd = parse(&["polytwister", "--params", "{nope", "list"]);
        assert!(section_params(&cmd).is_err());
    }

    #[test]
    fn frames_are_written_under_their_stems() {
        let dir = tempdir().unwrap();
        let plan = FramePlan::new(2, 1.0).unwrap();
        let tri = Mesh::new(vec![Vec3::zeros(), Vec3::x(), Vec3::y()], vec![[0, 1, 2]]);
        let names = write_frames(dir.path(), &plan, &[tri, Mesh::empty()]).unwrap();
        assert_eq!(names, vec!["out_0.obj", "out_1.obj"]);
        let first = fs::read_to_string(dir.path().join("out_0.obj")).unwrap();
        assert!(first.contains("f 1 2 3"));
        assert!(dir.path().join("out_1.obj").exists());
    }

    #[test]
    fn normalized_section_has_unit_extent() {
        let spec = get_spec("tetratwister").unwrap();
        let params = SectionParams {
            angular_tol: 0.3,
            ..SectionParams::default()
        };
        let raw = section_mesh(&spec, 0.4, false, &params).unwrap();
        let unit = section_mesh(&spec, 0.4, true, &params).unwrap();
        assert!(raw.max_distance() > 0.0);
        assert!((unit.max_distance() - 1.0).abs() < 1e-12);
        assert_eq!(unit.faces, raw.faces);
    }

    #[test]
    fn unknown_name_is_reported() {
        let err = lookup("no such twister").unwrap_err();
        assert!(format!("{err:#}").contains("no such twister"));
    }
}
