use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context;
use lab_client::LabClient;
use lab_client::reports::ImageAnalysis;
use lab_core::entities::DiseaseAnalysis;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AnalysisResponse {
    file: String,
    stage: String,
    disease: String,
    probability: Option<f64>,
    probabilities: BTreeMap<String, f64>,
}

pub async fn run(image: &Path, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let (file_name, analysis) = analyze_file(&ctx.client, image).await?;
    let summary = summarize(&file_name, &analysis);
    output(
        &AnalysisResponse {
            file: summary.file_name,
            stage: summary.stage,
            disease: summary.disease,
            probability: summary.probability,
            probabilities: analysis.disease.probability,
        },
        flags.format,
    )
}

/// Upload one image for analysis behind a spinner.
pub async fn analyze_file(
    client: &LabClient,
    image: &Path,
) -> anyhow::Result<(String, DiseaseAnalysis)> {
    let file_name = image
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("image")
        .to_string();
    let spinner = Progress::spinner(&format!("Analysing {file_name}…"));
    let result = client.analyze_image_file(image).await;
    spinner.finish_clear();
    let analysis = result.with_context(|| format!("could not analyse {}", image.display()))?;
    Ok((file_name, analysis))
}

/// The analysis as attached to a report: the predicted class and its
/// probability.
pub fn summarize(file_name: &str, analysis: &DiseaseAnalysis) -> ImageAnalysis {
    ImageAnalysis {
        file_name: file_name.to_string(),
        stage: analysis.stage.clone(),
        disease: analysis.disease.predict.clone(),
        probability: analysis
            .disease
            .probability
            .get(&analysis.disease.predict)
            .copied(),
    }
}

#[cfg(test)]
mod tests {
    use lab_core::entities::Disease;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn summary_takes_probability_of_predicted_class() {
        let analysis = DiseaseAnalysis {
            stage: "seedling".into(),
            disease: Disease {
                predict: "soft_rot".into(),
                probability: BTreeMap::from([("soft_rot".into(), 0.8), ("healthy".into(), 0.2)]),
            },
        };
        assert_eq!(
            summarize("leaf.jpg", &analysis),
            ImageAnalysis {
                file_name: "leaf.jpg".into(),
                stage: "seedling".into(),
                disease: "soft_rot".into(),
                probability: Some(0.8),
            }
        );
    }

    #[test]
    fn missing_class_probability_is_none() {
        let analysis = DiseaseAnalysis {
            stage: "flask".into(),
            disease: Disease {
                predict: "unknown".into(),
                probability: BTreeMap::new(),
            },
        };
        assert_eq!(summarize("a.png", &analysis).probability, None);
    }
}
