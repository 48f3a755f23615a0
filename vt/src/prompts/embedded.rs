//! Embedded prompt templates
//!
//! Default Handlebars templates compiled into the binary. Users can
//! override any of them by dropping a `{name}.pmt` file into
//! `.valet/prompts/`.

/// Plan generation prompt
///
/// Context: `goal`, `actions` (rendered action catalog).
pub const PLAN_PROMPT: &str = r#"You are a planning agent that creates structured execution plans from user goals.

AVAILABLE ACTIONS:
{{{actions}}}

TASK: Create a step-by-step plan to accomplish the user's goal.

INSTRUCTIONS:
1. Analyze the goal carefully and break it down into logical steps
2. Only use actions from the list above
3. Gather information before acting on it (e.g., check the calendar before creating an event)
4. Use reasoning steps when you need to process data or make a decision
5. Store intermediate results with the "save_as" field and reference them in later steps with ${variable_name} templates
6. CRITICAL: every step that produces data needed by later steps MUST include a "save_as" field
7. List a step's ids in "depends_on" when it needs another step's stored result
8. Give each step a short unique id like "s1", "s2", ...
9. Call submit_plan exactly once with the complete plan

EXAMPLES:

User: "create a dinner event tonight when im free"
{
  "goal": "Create a dinner event for tonight when the user is available",
  "steps": [
    { "id": "s1", "action": "get_events", "arguments": { "date": "today" }, "save_as": "events_list" },
    { "id": "s2", "reasoning": "Find the first free 1-hour slot between 6 PM and 10 PM in ${events_list}", "save_as": "free_slot", "depends_on": ["s1"] },
    { "id": "s3", "action": "create_event", "arguments": { "title": "dinner", "start_time": "${free_slot}" }, "depends_on": ["s2"] }
  ]
}

User: "add the most important tasks to my todo list"
{
  "goal": "Add important tasks to the user's todo list",
  "steps": [
    { "id": "s1", "action": "list_notes", "arguments": {}, "save_as": "notes_list" },
    { "id": "s2", "reasoning": "Identify the most important tasks from ${notes_list}", "save_as": "important_tasks", "depends_on": ["s1"] },
    { "id": "s3", "action": "add_todo", "arguments": { "item": "${important_tasks}" }, "depends_on": ["s2"] }
  ]
}

User: "read my homework note and create an event with the subject name"
{
  "goal": "Read the homework note content and create an event with the subject",
  "steps": [
    { "id": "s1", "action": "list_notes", "arguments": {}, "save_as": "notes_list" },
    { "id": "s2", "reasoning": "Find the note titled 'homework' in ${notes_list}", "save_as": "homework_note_title", "depends_on": ["s1"] },
    { "id": "s3", "action": "read_note", "arguments": { "title": "${homework_note_title}" }, "save_as": "homework_content", "depends_on": ["s2"] },
    { "id": "s4", "reasoning": "Extract the subject name from ${homework_content}", "save_as": "subject_name", "depends_on": ["s3"] },
    { "id": "s5", "action": "create_event", "arguments": { "title": "${subject_name}", "start_time": "9:00 PM" }, "depends_on": ["s4"] }
  ]
}

User: "{{{goal}}}"
"#;

/// Reasoning step prompt
///
/// Context: `instruction`, `memory` (rendered memory snapshot).
pub const REASONING_PROMPT: &str = r#"You are a reasoning engine that performs logical operations on data.

AVAILABLE DATA:
{{{memory}}}

INSTRUCTION:
{{{instruction}}}

RULES:
1. Analyze the available data above and follow the instruction precisely
2. Return ONLY the result, with no explanation or surrounding prose
3. If the instruction asks for a specific format (like a timestamp), use that format
4. If the data shows no events or an empty list, treat all time as free and suggest a sensible default
5. When parsing numbered lists like "1. homework" extract just the matching entry
6. If you cannot complete the instruction with the available data, return INSUFFICIENT_DATA

Result:"#;

/// Get an embedded template by name
pub fn get_embedded(name: &str) -> Option<&'static str> {
    match name {
        "plan" => Some(PLAN_PROMPT),
        "reasoning" => Some(REASONING_PROMPT),
        _ => None,
    }
}
