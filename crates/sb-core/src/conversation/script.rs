//! Reply texts for the conversation script

pub const REENGAGE: &str = "Hey 👋 just checking in! Would you still like to continue our chat?";

pub const WELCOME: &str = "Thank you for contacting Matshepo! Please let us know how we can help you.\n\
Type \"Blossom\" for Weightloss Products or type \"Tribe\" to join the Manifestation Group";

pub const TOPIC_REPROMPT: &str = "Please type 'Blossom' or 'Tribe' to proceed.";

pub const ASK_NAME: &str = "Please share your name so we can save your number.";

pub const BLOSSOM_REPROMPT: &str = "Please reply with:\n1 - To buy\n2 - To join";

pub const BLOSSOM_BUY: &str = "https://Blossombloom.me/product-details-customer.php?id=51&ref=GT49863&tok=482640\n\n\
Thank you for your purchase.\n\n\
Any queries on your order once placed, please email:\n\
support@blossombloom.me";

pub const BLOSSOM_JOIN: &str = "https://blossombloom.me/dashboard/register.php?ref=Matshepoblooms\n\n\
Thank you for choosing our team.\n\n\
Any queries on your order once placed, please email:\n\
support@blossombloom.me\n\n\
We will reach out to you once you have signed up to help you get started.";

pub const TRIBE_REPROMPT: &str = "Please reply with:\n1 - To agree\n2 - To disagree";

pub const TRIBE_AGREE: &str = "Thank you, you will be added to the group month end.\n\
We have lives on Matshepo’s page on Wednesdays and Sundays, do join us. 🙏🏾";

pub const TRIBE_DISAGREE: &str = "Thank you for contacting us, have a pleasant day.";

pub const FALLBACK: &str = "How can I assist you today?";

/// Address-book location tags, one per completed path
pub const TAG_BLOSSOM_BUYER: &str = "Blossom Buyer";
pub const TAG_BLOSSOM_JOINER: &str = "Blossom Joiner";
pub const TAG_TRIBE_GROUP: &str = "Tribe Group";

const VIDEO_LINK: &str = "https://youtu.be/ikQgwuWt0e0?si=_bYTZGQB5q5UCBX3";

const GROUP_RULES: &str = "**GROUP RULES**\n\n\
1) This is a safe space so let's never make anyone feel small or any other emotion that's not on the positive spectrum. ❤\n\n\
2) We have different countries and cultures here so let’s not discriminate or make anyone feel left out, thus ENGLISH is the language of communication in the group.\n\n\
3) Any form of negative energy is grounds for you to be removed unless you are feeling weak in spirit and are asking for help. 😆\n\n\
4) You have made a commitment, stick to it... 😃 You are free to leave if at any time you feel uncomfortable. (this includes participating in visualisation in the morning and all other activities)\n\n\
5) Let's have the best time of our lives creating our best versions 😁🥳\n\n\
6) You can quote religious texts or refer to them but please don't push any agendas of trying to convince anyone that what you believe is true. Everyone here is entitled to believe what they want.\n\n\
7) We know where good morning comes from and please be aware that we still say it here as we attached no 'negative' meaning to it. You are more than welcome to say Grand Rising or any other vocabulary that sits well with you.\n\n\
8) Universe, Divine, Source, Spirit, God, Allah etc are all titles. If someone says it in a way you don't like, change it in your mind to suit the title you can align with but don't miss someone's message just because you close off after hearing a title you don't use.\n\n\
9) Be slow to anger. No one is out here to get you. Before getting into your emotions, clarify someone's intent and also look within as to why it triggered you.\n\n\
10) In the morning before 11:11, DO NOT GREET, instead send ONE AFFIRMATION that boosts your spirit. This will contribute to the collective affirmations that we read at 11:11 to increase our vibrational energy for the day. Please let it be less than 4 lines.\n\n\
11) You CANNOT use this group to advertise your business. If you are found doing this or sending DMs to members without their consent, you will be removed with immediate effect.\n\n\
12) A Voice Chat is prohibited unless Matshepo is the one initiating it. Or any admin personal in agreement with Matshepo.\n\n\
13) Individuals will be REMOVED IMMEDIATELY from the group for the following:\n\
i) Posting pictures during affirmations. All affirmations MUST BE TYPED.\n\
ii) Sending competition links and/or any other links that do not align with the group’s purpose.\n\
iii) Selling and/or promoting your business or anyone’s business.\n\
iv) Forex, get rich quick schemes or any financial markets.";

/// Video instructions sent after a Blossom contact gives their name
pub fn blossom_options(name: &str) -> String {
    format!(
        "Awesome {name}, please watch the following short video that will cover all needed information.\n\
         When done please message respond with:\n\
         1 - To buy\n\
         2 - To Join\n\n\
         Watch here:\n\
         {VIDEO_LINK}"
    )
}

/// Group rules sent after a Tribe contact gives their name
pub fn tribe_rules(name: &str) -> String {
    format!(
        "Awesome {name},\nPlease read the rules of the group and type:\n\n\
         1 - To agree\n\
         2 - To disagree\n\n\
         {GROUP_RULES}"
    )
}
