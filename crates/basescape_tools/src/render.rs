//! Rendering bases to PNG files.

use std::path::{Path, PathBuf};

use basescape_core::base::Base;
use basescape_core::pointer::DisplayScale;
use basescape_core::surface::{Palette, Surface};
use basescape_core::view::BaseView;
use rayon::prelude::*;
use serde::Serialize;
use tracing::{info, warn};

use crate::error::Result;
use crate::export::save_png;
use crate::loader::{BaseFile, DataSet};
use crate::sprites::debug_sprites;

/// Optional selection overlay to bake into the output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Selection size; 0 draws no overlay.
    pub select: u32,
    /// Hover cell for the overlay.
    pub hover: Option<(u32, u32)>,
    /// Worker threads; 0 uses the rayon default.
    pub jobs: usize,
}

/// Outcome of rendering one base.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderOutcome {
    /// Source base file.
    pub source: PathBuf,
    /// Written PNG, when rendering succeeded.
    pub output: Option<PathBuf>,
    /// Failure message otherwise.
    pub error: Option<String>,
}

/// Render one base through a fresh view and flatten the frame.
pub fn render_base(base: Base, data: &DataSet, options: RenderOptions) -> Result<Surface> {
    let mut view = BaseView::new(data.config.clone(), (0, 0))?;
    view.set_sprites(debug_sprites(&data.ruleset, &data.config));
    view.bind_base(base);

    if options.select > 0 {
        view.set_selectable(options.select);
        if let Some((x, y)) = options.hover {
            let cell = i32::try_from(data.config.cell_size).unwrap_or(i32::MAX);
            let centre = |c: u32| {
                i32::try_from(c)
                    .unwrap_or(i32::MAX)
                    .saturating_mul(cell)
                    .saturating_add(cell / 2)
            };
            view.pointer_move((centre(x), centre(y)), DisplayScale::ONE);
        }
    }

    Ok(view.render().composite())
}

fn render_file(file: &BaseFile, data: &DataSet, out_dir: &Path, options: RenderOptions) -> Result<PathBuf> {
    let base = Base::from_data(&file.data, &data.ruleset)?;
    let surface = render_base(base, data, options)?;
    let output = out_dir.join(format!("{}.png", file.stem()));
    save_png(&surface, &Palette::default(), &output)?;
    Ok(output)
}

/// Render every base of a data set in parallel, one view per base.
#[must_use]
pub fn render_all(data: &DataSet, out_dir: &Path, options: RenderOptions) -> Vec<RenderOutcome> {
    if options.jobs > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(options.jobs)
            .build_global()
            .ok(); // Ignore if already set
    }

    let outcomes: Vec<RenderOutcome> = data
        .bases
        .par_iter()
        .map(|file| match render_file(file, data, out_dir, options) {
            Ok(output) => RenderOutcome {
                source: file.path.clone(),
                output: Some(output),
                error: None,
            },
            Err(e) => {
                warn!(file = %file.path.display(), "Render failed: {e}");
                RenderOutcome {
                    source: file.path.clone(),
                    output: None,
                    error: Some(e.to_string()),
                }
            }
        })
        .collect();

    info!(
        rendered = outcomes.iter().filter(|o| o.output.is_some()).count(),
        failed = outcomes.iter().filter(|o| o.error.is_some()).count(),
        "Render batch complete"
    );
    outcomes
}
