//! Prompt templates for the dialogue adapter

use super::LearnerLevel;
use crate::recorder::narration::format_nodes;
use crate::recorder::{Discipline, Step};

pub const TUTOR_SYSTEM: &str = "You are a helpful tutor explaining graph algorithms.";

pub const EVALUATOR_SYSTEM: &str =
    "You are a helpful tutor evaluating understanding of graph algorithms.";

fn format_edges(edges: &[(u32, u32)]) -> String {
    let items: Vec<String> = edges.iter().map(|(a, b)| format!("({}, {})", a, b)).collect();
    format!("[{}]", items.join(", "))
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Ask for an explanation of one recorded step
pub fn explain_step(discipline: Discipline, step: &Step, level: LearnerLevel) -> String {
    let current = step
        .current
        .map(|n| n.to_string())
        .unwrap_or_else(|| "None".to_string());
    let container = match discipline {
        Discipline::DepthFirst => "Stack",
        Discipline::BreadthFirst => "Queue",
    };

    format!(
        "Explain the following step of the {alg} algorithm to {level} student:\n\
         \n\
         Current node: {current}\n\
         Visited nodes so far: {visited}\n\
         {container}: {frontier}\n\
         Edges being added in this step: {edges}\n\
         Step summary: {narration}\n\
         \n\
         Please explain:\n\
         1. What's happening in this step\n\
         2. Why it's happening\n\
         3. How this relates to the {alg} algorithm principles\n\
         \n\
         Keep your explanation concise and educational, focusing on helping the student understand the algorithm.",
        alg = discipline,
        level = level.with_article(),
        current = current,
        visited = format_nodes(&step.visited),
        container = container,
        frontier = format_nodes(&step.frontier_snapshot),
        edges = format_edges(&step.edges_discovered),
        narration = step.narration,
    )
}

/// Ask for a hint that guides without giving the answer away
pub fn hint(question: &str, discipline: Discipline, level: LearnerLevel) -> String {
    format!(
        "{level} student learning about the {alg} algorithm asks:\n\
         \n\
         \"{question}\"\n\
         \n\
         Give a helpful hint that guides them towards understanding without giving away the complete answer. \
         Explain the concept in a way that's appropriate for their expertise level.",
        level = capitalize(&level.with_article()),
        alg = discipline,
        question = question.trim(),
    )
}

/// Ask for a JSON evaluation of a student's answer
pub fn evaluate(
    student_answer: &str,
    correct_answer: &str,
    discipline: Discipline,
    context: Option<&str>,
) -> String {
    let context = context
        .map(str::to_string)
        .unwrap_or_else(|| format!("General question about the {} algorithm", discipline));

    format!(
        "Evaluate this student's answer about the {alg} algorithm.\n\
         \n\
         Question context: {context}\n\
         \n\
         Correct answer: {correct}\n\
         \n\
         Student's answer: {student}\n\
         \n\
         Please provide:\n\
         1. A score from 0-100\n\
         2. Specific feedback about what was correct and what could be improved\n\
         3. A brief explanation of any misconceptions\n\
         \n\
         Format your response as a JSON object with these keys: score, feedback, misconceptions",
        alg = discipline,
        context = context,
        correct = correct_answer,
        student = student_answer,
    )
}

/// System instruction for free-form conversation
pub fn chat_system(discipline: Discipline, level: LearnerLevel) -> String {
    format!(
        "You are an intelligent tutoring system specializing in graph algorithms, particularly {alg}.\n\
         Your goal is to help {level} student understand the algorithm through conversation.\n\
         \n\
         - Explain concepts clearly and concisely\n\
         - Use analogies when helpful\n\
         - If asked about code, provide short examples\n\
         - If the student is confused, try different approaches to explanation\n\
         - Keep responses focused on helping the student learn {alg}\n\
         \n\
         Your teaching approach should be socratic - guide the student to discover the answer rather than just telling them.",
        alg = discipline,
        level = level.with_article(),
    )
}
