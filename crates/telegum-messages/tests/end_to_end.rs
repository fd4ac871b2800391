use std::sync::Mutex;

use async_trait::async_trait;
use teloxide::types::{ChatId, InlineKeyboardButtonKind, MessageId, ReplyMarkup};

use telegum_buttons::{Button, JsonPayload};
use telegum_messages::{
    BotApi, EditCaption, EditText, MessageContent, Messenger, SendPhoto, SendText, TelegramResult,
    to_message_content,
};
use telegum_tgx::{Node, bold, br, codeblock, fragment, italic, keyboard, link};

/// Records sent texts and edited texts in order.
#[derive(Default)]
struct RecordingBot {
    texts: Mutex<Vec<SendText>>,
    edits: Mutex<Vec<EditText>>,
}

#[async_trait]
impl BotApi for RecordingBot {
    async fn send_text(&self, request: SendText) -> TelegramResult<MessageId> {
        let mut texts = self.texts.lock().unwrap();
        texts.push(request);
        Ok(MessageId(texts.len() as i32))
    }

    async fn send_photo(&self, _request: SendPhoto) -> TelegramResult<MessageId> {
        unreachable!("no photos in this suite")
    }

    async fn edit_text(&self, request: EditText) -> TelegramResult<MessageId> {
        let id = request.message_id;
        self.edits.lock().unwrap().push(request);
        Ok(id)
    }

    async fn edit_caption(&self, _request: EditCaption) -> TelegramResult<MessageId> {
        unreachable!("no captions in this suite")
    }
}

fn counter_view(count: i64, increment: &Button<JsonPayload<i64>>, reset: &Button) -> Node {
    fragment([
        bold("Counter"),
        br(),
        Node::from("Value: "),
        Node::from(count),
        keyboard([
            increment.render("+1", &1).unwrap(),
            increment.render("+10", &10).unwrap(),
            br(),
            reset.label("Reset"),
        ]),
    ])
}

#[test]
fn codeblock_with_language_renders_pre_code() {
    let content = to_message_content(codeblock(Some("ts"), "x")).unwrap();
    assert_eq!(
        content,
        MessageContent::Text {
            text: "<pre><code class=\"language-ts\">x</code></pre>".to_string(),
            reply_markup: None,
        }
    );
}

#[test]
fn nested_entities_escape_only_leaves() {
    let tree = fragment([
        link("https://example.com/?a=1", italic("docs & <more>")),
        Node::from(" "),
        bold(fragment([Node::from("x"), italic("y")])),
    ]);
    let MessageContent::Text { text, .. } = to_message_content(tree).unwrap() else {
        panic!("expected text");
    };
    assert_eq!(
        text,
        "<a href=\"https://example.com/?a=1\"><i>docs &amp; &lt;more&gt;</i></a> <b>x<i>y</i></b>"
    );
}

#[tokio::test]
async fn counter_round_trip_through_buttons() {
    let increment = Button::with_codec("counter.increment", JsonPayload::<i64>::new());
    let reset = Button::new("counter.reset");
    let messenger = Messenger::new(RecordingBot::default());

    let sent = messenger
        .send(counter_view(0, &increment, &reset))
        .to(ChatId(7), None)
        .await
        .unwrap();

    let sent_request = messenger.api().texts.lock().unwrap()[0].clone();
    assert_eq!(sent_request.text, "<b>Counter</b>\nValue: 0");
    let Some(ReplyMarkup::InlineKeyboard(markup)) = sent_request.reply_markup else {
        panic!("expected inline keyboard");
    };
    assert_eq!(markup.inline_keyboard.len(), 2);
    assert_eq!(markup.inline_keyboard[0].len(), 2);

    // Simulate the user tapping "+10".
    let InlineKeyboardButtonKind::CallbackData(data) = &markup.inline_keyboard[0][1].kind else {
        panic!("expected callback button");
    };
    assert_eq!(reset.parse(data).unwrap(), None);
    let step = increment.parse(data).unwrap().unwrap();
    assert_eq!(step, 10);

    let edited = messenger
        .edit(ChatId(7), sent)
        .to(counter_view(step, &increment, &reset))
        .await
        .unwrap();
    assert_eq!(edited, Some(sent));

    let edits = messenger.api().edits.lock().unwrap();
    assert_eq!(edits.len(), 1);
    assert_eq!(edits[0].text, "<b>Counter</b>\nValue: 10");
    assert_eq!(edits[0].reply_markup.as_ref().unwrap(), &markup);
}
