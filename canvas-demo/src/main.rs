use anyhow::{bail, Context};
use canvas_facade::{
    Canvas, CubicBezierParams, FlatteningMode, Font, LineCap, QuadraticBezierParams, RectParams,
    Repetition,
};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

/// canvas-demo: Render the canvas driver programs to PNG files
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Canvas width in pixels
    #[arg(long, global = true, default_value_t = 320)]
    width: u32,

    /// Canvas height in pixels
    #[arg(long, global = true, default_value_t = 280)]
    height: u32,

    /// Path to the PNG file to be created
    #[arg(short, long, global = true, default_value = "canvas.png")]
    output: PathBuf,

    /// Curve flattening strategy
    #[arg(long, global = true, value_enum, default_value_t = Flatten::Fixed)]
    flatten: Flatten,

    /// Maximum deviation in device pixels for adaptive flattening
    #[arg(long, global = true, default_value_t = canvas_facade::curve::DEFAULT_TOLERANCE)]
    tolerance: f64,

    #[command(subcommand)]
    command: Command,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Flatten {
    /// 10,001 uniform samples per curve
    Fixed,
    /// Recursive subdivision to within --tolerance
    Adaptive,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Draw a thick line with round caps
    DrawLine,

    /// Stroke a cubic Bezier curve
    DrawBezier,

    /// Stroke a quadratic Bezier curve
    DrawQuadratic,

    /// Fill the canvas with a three-stop linear gradient
    Gradient,

    /// Draw "Hello World!" in black and "Big smile!" with a gradient
    DisplayText {
        /// Stroke the glyph outlines instead of filling them
        #[arg(long)]
        outline: bool,
    },

    /// Draw an image file at (10, 10)
    DisplayImage {
        /// Path to the image file (PNG, JPEG or GIF)
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Copy a filled region to another spot with getImageData/putImageData
    CopyRegion,

    /// Fill a rectangle with an image pattern
    Pattern {
        /// Path to the image file (PNG, JPEG or GIF)
        #[arg(short, long)]
        input: PathBuf,

        /// One of repeat, repeat-x, repeat-y, no-repeat
        #[arg(short, long, default_value = "repeat")]
        repetition: Repetition,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(err) = run(&cli) {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let flattening = match cli.flatten {
        Flatten::Fixed => FlatteningMode::FixedStep,
        Flatten::Adaptive => {
            if !(cli.tolerance.is_finite() && cli.tolerance > 0.0) {
                bail!("Tolerance must be a positive number, got {}", cli.tolerance);
            }
            FlatteningMode::adaptive(cli.tolerance)
        }
    };

    let mut ctx = Canvas::builder(cli.width, cli.height)
        .flattening(flattening)
        .build()
        .with_context(|| format!("Failed to create {}x{} canvas", cli.width, cli.height))?;

    log::info!("running {:?} on a {}x{} canvas", cli.command, cli.width, cli.height);
    match &cli.command {
        Command::DrawLine => draw_line(&mut ctx),
        Command::DrawBezier => draw_bezier(&mut ctx)?,
        Command::DrawQuadratic => draw_quadratic(&mut ctx)?,
        Command::Gradient => gradient(&mut ctx)?,
        Command::DisplayText { outline } => display_text(&mut ctx, *outline)?,
        Command::DisplayImage { input } => display_image(&mut ctx, input)?,
        Command::CopyRegion => copy_region(&mut ctx)?,
        Command::Pattern { input, repetition } => pattern(&mut ctx, input, *repetition)?,
    }

    ctx.save_png(&cli.output)
        .with_context(|| format!("Failed to write {}", cli.output.display()))?;
    println!("Wrote {}", cli.output.display());
    Ok(())
}

fn draw_line(ctx: &mut Canvas) {
    ctx.begin_path();
    ctx.set_line_width(10.0);
    ctx.set_line_cap(LineCap::Round);
    ctx.move_to(20.0, 20.0);
    ctx.line_to(200.0, 20.0);
    ctx.stroke();
}

fn draw_bezier(ctx: &mut Canvas) -> anyhow::Result<()> {
    ctx.begin_path();
    ctx.move_to(20.0, 20.0);
    ctx.bezier_curve_to(&CubicBezierParams {
        cp1x: 20.0,
        cp1y: 100.0,
        cp2x: 200.0,
        cp2y: 100.0,
        x: 200.0,
        y: 20.0,
    })?;
    ctx.stroke();
    Ok(())
}

fn draw_quadratic(ctx: &mut Canvas) -> anyhow::Result<()> {
    ctx.begin_path();
    ctx.set_stroke_style("crimson")?;
    ctx.set_line_width(3.0);
    ctx.move_to(20.0, 120.0);
    ctx.quadratic_curve_to(&QuadraticBezierParams {
        cpx: 110.0,
        cpy: 20.0,
        x: 200.0,
        y: 120.0,
    })?;
    ctx.stroke();
    Ok(())
}

fn gradient(ctx: &mut Canvas) -> anyhow::Result<()> {
    let width = ctx.width() as f32;
    let height = ctx.height() as f32;
    let mut gradient = ctx.create_linear_gradient(0.0, 0.0, width, 0.0);
    gradient.add_color_stop(0.0, "#ff00ff")?;
    gradient.add_color_stop(0.5, "#0000ff")?;
    gradient.add_color_stop(1.0, 0xffff0000u32)?;
    ctx.set_fill_style_gradient(gradient);
    ctx.fill_rect(&RectParams::new(0.0, 0.0, width, height));
    Ok(())
}

fn display_text(ctx: &mut Canvas, outline: bool) -> anyhow::Result<()> {
    let draw = |ctx: &mut Canvas, text: &str, x: f32, y: f32| {
        if outline {
            ctx.stroke_text(text, x, y);
        } else {
            ctx.fill_text(text, x, y);
        }
    };

    ctx.set_font(Font::named("Georgia", 20.0));
    ctx.set_line_width(1.0);
    draw(ctx, "Hello World!", 10.0, 50.0);

    ctx.set_font(Font::named("Verdana", 30.0));
    let mut gradient = ctx.create_linear_gradient(0.0, 0.0, ctx.width() as f32, 0.0);
    gradient.add_color_stop(0.0, "#ff00ff")?;
    gradient.add_color_stop(0.5, "#0000ff")?;
    gradient.add_color_stop(1.0, "#ff0000")?;
    if outline {
        ctx.set_stroke_style_gradient(gradient);
    } else {
        ctx.set_fill_style_gradient(gradient);
    }
    draw(ctx, "Big smile!", 10.0, 90.0);
    Ok(())
}

fn display_image(ctx: &mut Canvas, input: &Path) -> anyhow::Result<()> {
    ctx.draw_image_file(input, 10, 10)
        .with_context(|| format!("Failed to draw image {}", input.display()))?;
    Ok(())
}

fn copy_region(ctx: &mut Canvas) -> anyhow::Result<()> {
    ctx.set_fill_style("rgba(1.0, 0.0, 0.0, 1.0)")?;
    ctx.fill_rect(&RectParams::new(10.0, 10.0, 50.0, 50.0));
    ctx.set_fill_style("steelblue")?;
    ctx.fill_rect(&RectParams::new(20.0, 20.0, 30.0, 30.0));

    let region = ctx.get_image_data(10, 10, 50, 50)?;
    ctx.put_image_data(&region, 80, 10);
    Ok(())
}

fn pattern(ctx: &mut Canvas, input: &Path, repetition: Repetition) -> anyhow::Result<()> {
    let pattern = ctx
        .create_pattern_from_file(input, repetition)
        .with_context(|| format!("Failed to load pattern image {}", input.display()))?;
    ctx.set_fill_style_pattern(pattern);
    let width = ctx.width() as f32;
    let height = ctx.height() as f32;
    ctx.fill_rect(&RectParams::new(0.0, 0.0, width, height));
    Ok(())
}
