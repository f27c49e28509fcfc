//! Built-in topic prompts for the EEG-analysis tool set.
//!
//! Each topic is a self-contained instruction block: conventions first, then
//! worked examples. Blocks are concatenated in table order when several
//! topics match, so numeric conventions stay adjacent to their examples.

use crate::routing::topic::{TopicPrompt, TopicTable};

/// Generic instruction block used when no topic is confidently relevant.
pub const BASE_PROMPT: &str = r#"You are the command assistant of an EEG-analysis application.
When the user asks for an operation, reply with one JSON object per operation, in order:
{"command": "<name>", "parameters": {<flat key-value pairs>}}
When the user is chatting or information is missing, reply with:
{"text": "<your answer or question>"}
Parameters are flat: never nest objects inside "parameters".
"#;

/// Built-in ordered topic table.
///
/// Used when the configuration does not override the topic table.
pub fn default_topics() -> TopicTable {
    let topics = vec![
        TopicPrompt::new(
            "Start",
            r#"Greeting or general questions about the application.
Answer briefly with {"text": "..."} and point the user at importing data as the first step.
"#,
        ),
        TopicPrompt::new(
            "Import Data",
            r#"Loading EEG recordings into the workspace.
Example: "load my .set file from ./data"
-> {"command": "Import Data", "parameters": {"file_path": "./data", "data_type": "set"}}
Supported data_type values: set, edf, gdf, mat. Ask for the path with {"text": "..."} if it is missing.
"#,
        ),
        TopicPrompt::new(
            "Preprocessing",
            r#"Signal cleaning before training. Frequencies are in Hz, times in seconds.
Example: "apply a 1-40 Hz bandpass"
-> {"command": "Filtering", "parameters": {"l_freq": 1, "h_freq": 40}}
Example: "downsample to 250 Hz"
-> {"command": "Resample", "parameters": {"sfreq": 250}}
Example: "cut epochs from 0 to 4 seconds"
-> {"command": "Epoching", "parameters": {"tmin": 0, "tmax": 4}}
A filter needs at least one of l_freq / h_freq.
"#,
        ),
        TopicPrompt::new(
            "Training",
            r#"Dataset splitting and model training.
Splitting types: "session", "trial", "subject".
Example: "split the data by trial"
-> {"command": "Dataset Splitting", "parameters": {"training_type": "trial", "testing_type": "trial", "validation_type": "trial"}}
Example: "train SCCNet for 300 epochs"
-> {"command": "Model Training", "parameters": {"model": "SCCNet", "epochs": 300}}
Available models: SCCNet, EEGNet, ShallowConvNet.
"#,
        ),
        TopicPrompt::new(
            "Evaluation",
            r#"Judging a trained model.
Example: "show me the accuracy"
-> {"command": "Evaluation", "parameters": {"metric": "accuracy"}}
Example: "plot the confusion matrix"
-> {"command": "Evaluation", "parameters": {"confusion_matrix": True, "plot": True}}
"#,
        ),
        TopicPrompt::new(
            "Visualization",
            r#"Plots of the data itself.
plot_type values: "raw", "psd", "topomap".
Example: "show the power spectrum of channel Cz"
-> {"command": "Visualization", "parameters": {"plot_type": "psd", "channel": "Cz"}}
"#,
        ),
    ];

    // Built-in table is non-empty with non-blank texts
    TopicTable::new(topics).expect("builtin topic table is well-formed")
}
