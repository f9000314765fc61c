//! Example: Building a small flowchart with the builder API
//!
//! Lays out a header, two process steps, a decision and a result, connects
//! them with bound arrows and writes `flowchart_example.excalidraw`.

use scribble::{Document, color::Color, element::ElementOptions};

fn styled(stroke: &str, fill: &str) -> Result<ElementOptions, Box<dyn std::error::Error>> {
    Ok(ElementOptions::new()
        .with_stroke_color(Color::new(stroke)?)
        .with_background_color(Color::new(fill)?)
        .with_roughness(0))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Building flowchart...\n");

    let mut doc = Document::new().with_background_color(Color::new("#f0f9ff")?);

    let blue = styled("#1864ab", "#d0ebff")?;
    let green = styled("#2b8a3e", "#d3f9d8")?;
    let orange = styled("#e67700", "#fff3bf")?;
    let purple = styled("#862e9c", "#f3d9fa")?;
    let red = styled("#c92a2a", "#ffe3e3")?;

    let header = doc.add_rectangle(300.0, 100.0, 200.0, 80.0, &blue)?;
    let process1 = doc.add_rectangle(150.0, 250.0, 180.0, 100.0, &green)?;
    let process2 = doc.add_rectangle(450.0, 250.0, 180.0, 100.0, &orange)?;
    let decision = doc.add_diamond(300.0, 400.0, 200.0, 150.0, &purple)?;
    let result = doc.add_rectangle(300.0, 600.0, 200.0, 80.0, &red)?;

    // Arrows take the color of the element they leave from
    let arrow = |stroke: &str| -> Result<ElementOptions, Box<dyn std::error::Error>> {
        Ok(ElementOptions::new().with_stroke_color(Color::new(stroke)?))
    };
    doc.connect(header, process1, &arrow("#1864ab")?)?;
    doc.connect(header, process2, &arrow("#1864ab")?)?;
    doc.connect(process1, decision, &arrow("#2b8a3e")?)?;
    doc.connect(process2, decision, &arrow("#e67700")?)?;
    doc.connect(decision, result, &arrow("#862e9c")?)?;

    doc.save("flowchart_example.excalidraw", true)?;

    println!("Saved {} elements to flowchart_example.excalidraw", doc.len());
    Ok(())
}
